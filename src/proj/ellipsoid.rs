/// Reference ellipsoid parameters.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ellipsoid {
    /// Semi-major axis (metres)
    pub a: f64,
    /// Flattening (dimensionless)
    pub f: f64,
    /// Semi-minor axis: a * (1 - f)
    pub b: f64,
    /// First eccentricity squared: 2f - f^2
    pub e2: f64,
    /// Second eccentricity squared: e^2 / (1 - e^2)
    pub ep2: f64,
    /// Third flattening: f / (2 - f)
    pub n: f64,
}

impl Ellipsoid {
    pub const fn new(a: f64, f: f64) -> Self {
        let b = a * (1.0 - f);
        let e2 = 2.0 * f - f * f;
        let ep2 = e2 / (1.0 - e2);
        let n = f / (2.0 - f);
        Self { a, f, b, e2, ep2, n }
    }

    /// First eccentricity (sqrt is not available in const fn).
    pub fn eccentricity(&self) -> f64 {
        self.e2.sqrt()
    }

    /// e₁ = (1 - √(1-e²)) / (1 + √(1-e²)), used by the footpoint latitude series.
    pub fn e1(&self) -> f64 {
        let r = (1.0 - self.e2).sqrt();
        (1.0 - r) / (1.0 + r)
    }

    /// Radius of curvature in the prime vertical at latitude `phi` (radians).
    pub fn prime_vertical_radius(&self, phi: f64) -> f64 {
        self.a / (1.0 - self.e2 * phi.sin().powi(2)).sqrt()
    }

    /// Radius of curvature in the meridian at latitude `phi` (radians).
    pub fn meridian_radius(&self, phi: f64) -> f64 {
        self.a * (1.0 - self.e2) / (1.0 - self.e2 * phi.sin().powi(2)).powf(1.5)
    }
}

/// GRS80, the ellipsoid of SIRGAS 2000.
pub const GRS80: Ellipsoid = Ellipsoid::new(6_378_137.0, 1.0 / 298.257_222_101);
pub const WGS84: Ellipsoid = Ellipsoid::new(6_378_137.0, 1.0 / 298.257_223_563);
