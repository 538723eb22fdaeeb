/// Flat per-conversion pricing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlatCost {
    per_conversion: i64,
}

impl FlatCost {
    pub const fn new(per_conversion: i64) -> Self {
        Self { per_conversion }
    }

    /// Credits charged for one conversion, independent of its length
    pub const fn per_conversion(self) -> i64 {
        self.per_conversion
    }
}

impl Default for FlatCost {
    fn default() -> Self {
        Self::new(1)
    }
}
