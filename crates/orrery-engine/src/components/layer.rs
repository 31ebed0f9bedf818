/// Draw layer. Controls paint order inside one body's subsystem.
///
/// Layers are painted back-to-front: back ring halves first, the label last.
/// Anything in a layer below `Body` is hidden by the disk where they overlap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[repr(u8)]
pub enum DrawLayer {
    BackRings = 0,
    BackMoons = 1,
    #[default]
    Body = 2,
    FrontRings = 3,
    FrontMoons = 4,
    Label = 5,
}

impl DrawLayer {
    /// Total number of draw layers.
    pub const COUNT: usize = 6;

    /// Every layer in paint order.
    pub const ALL: [DrawLayer; Self::COUNT] = [
        Self::BackRings,
        Self::BackMoons,
        Self::Body,
        Self::FrontRings,
        Self::FrontMoons,
        Self::Label,
    ];

    /// Convert from a u8 value to a DrawLayer.
    /// Returns None if the value is out of range.
    pub fn from_u8(value: u8) -> Option<Self> {
        Self::ALL.get(value as usize).copied()
    }

    pub fn as_u8(self) -> u8 {
        self as u8
    }

    /// Name used for the `data-layer` attribute in rendered output.
    pub fn name(self) -> &'static str {
        match self {
            Self::BackRings => "back-rings",
            Self::BackMoons => "back-moons",
            Self::Body => "body",
            Self::FrontRings => "front-rings",
            Self::FrontMoons => "front-moons",
            Self::Label => "label",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_body() {
        assert_eq!(DrawLayer::default(), DrawLayer::Body);
    }

    #[test]
    fn ordering_is_back_to_front() {
        assert!(DrawLayer::BackRings < DrawLayer::BackMoons);
        assert!(DrawLayer::BackMoons < DrawLayer::Body);
        assert!(DrawLayer::Body < DrawLayer::FrontRings);
        assert!(DrawLayer::FrontRings < DrawLayer::FrontMoons);
        assert!(DrawLayer::FrontMoons < DrawLayer::Label);
    }

    #[test]
    fn round_trip_u8() {
        for val in 0..DrawLayer::COUNT as u8 {
            let layer = DrawLayer::from_u8(val).unwrap();
            assert_eq!(layer.as_u8(), val);
        }
        assert!(DrawLayer::from_u8(6).is_none());
    }
}
