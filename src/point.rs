use egui::Pos2;

/// Pressure assumed when the input device reports none
pub const DEFAULT_PRESSURE: f32 = 0.5;

/// A raw pointer sample as delivered by the event source
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerSample {
    /// Position in client (screen) coordinates
    pub client: Pos2,
    /// Pressure reported by the device, if any
    pub pressure: Option<f32>,
}

impl PointerSample {
    pub fn new(client: Pos2) -> Self {
        Self {
            client,
            pressure: None,
        }
    }

    pub fn with_pressure(client: Pos2, pressure: f32) -> Self {
        Self {
            client,
            pressure: Some(pressure),
        }
    }
}

/// A stroke sample in device-pixel space with its pressure
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
    pub pressure: f32,
}

impl Point {
    pub fn new(x: f32, y: f32, pressure: f32) -> Self {
        Self { x, y, pressure }
    }

    /// Map a raw sample into surface-local, scale-corrected coordinates.
    ///
    /// Without a surface origin the point lands at (0, 0); callers must
    /// tolerate that degenerate point.
    pub fn from_sample(sample: PointerSample, scale: f32, surface_origin: Option<Pos2>) -> Self {
        Self::from_sample_with_default(sample, scale, surface_origin, DEFAULT_PRESSURE)
    }

    /// Same as [`Point::from_sample`] with an explicit fallback pressure
    pub fn from_sample_with_default(
        sample: PointerSample,
        scale: f32,
        surface_origin: Option<Pos2>,
        default_pressure: f32,
    ) -> Self {
        let pressure = sample
            .pressure
            .filter(|p| p.is_finite())
            .map(|p| p.clamp(0.0, 1.0))
            .unwrap_or(default_pressure);

        match surface_origin {
            Some(origin) => Self {
                x: (sample.client.x - origin.x) * scale,
                y: (sample.client.y - origin.y) * scale,
                pressure,
            },
            None => Self {
                x: 0.0,
                y: 0.0,
                pressure,
            },
        }
    }

    pub fn distance_to(&self, other: &Point) -> f32 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    pub fn pos(&self) -> Pos2 {
        Pos2::new(self.x, self.y)
    }
}
