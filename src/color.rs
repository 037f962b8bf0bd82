use std::ops::{BitAnd, BitAndAssign, BitOr, BitOrAssign, Not};

/// One of the four players, named after the corner they start from.
/// Discriminants are distinct single bits so sets of colors pack into a
/// [`ColorSet`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Color {
    Blue = 0x1,
    Yellow = 0x2,
    Red = 0x4,
    Green = 0x8,
}

impl Color {
    /// All colors, in turn order (clockwise from the top-left corner).
    pub const ALL: [Color; 4] = [Color::Blue, Color::Yellow, Color::Red, Color::Green];

    #[inline]
    pub fn bit(self) -> u8 {
        self as u8
    }

    pub fn to_char(self) -> char {
        match self {
            Color::Blue => 'B',
            Color::Yellow => 'Y',
            Color::Red => 'R',
            Color::Green => 'G',
        }
    }

    pub fn from_char(c: char) -> Option<Color> {
        match c {
            'B' | 'b' => Some(Color::Blue),
            'Y' | 'y' => Some(Color::Yellow),
            'R' | 'r' => Some(Color::Red),
            'G' | 'g' => Some(Color::Green),
            _ => None,
        }
    }

    pub fn from_bit(bit: u8) -> Option<Color> {
        match bit {
            0x1 => Some(Color::Blue),
            0x2 => Some(Color::Yellow),
            0x4 => Some(Color::Red),
            0x8 => Some(Color::Green),
            _ => None,
        }
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Color::Blue => "Blue",
            Color::Yellow => "Yellow",
            Color::Red => "Red",
            Color::Green => "Green",
        };
        write!(f, "{}", name)
    }
}

/// A set of colors packed into one byte.
///
/// The board stores one of these per cell for both the `allowed` and
/// `frontier` masks. The cardinality is fixed at four by the rules, so this
/// is deliberately not a general-purpose set.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct ColorSet(u8);

impl ColorSet {
    pub const EMPTY: ColorSet = ColorSet(0);
    pub const ALL: ColorSet = ColorSet(0xF);

    #[inline]
    pub fn single(color: Color) -> ColorSet {
        ColorSet(color.bit())
    }

    /// The raw four-bit mask.
    #[inline]
    pub fn bits(self) -> u8 {
        self.0
    }

    #[inline]
    pub fn contains(self, color: Color) -> bool {
        self.0 & color.bit() != 0
    }

    #[inline]
    pub fn insert(&mut self, color: Color) {
        self.0 |= color.bit();
    }

    #[inline]
    pub fn remove(&mut self, color: Color) {
        self.0 &= !color.bit();
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub fn len(self) -> u32 {
        self.0.count_ones()
    }

    /// True if every color in `self` is also in `other`.
    #[inline]
    pub fn is_subset_of(self, other: ColorSet) -> bool {
        self.0 & !other.0 == 0
    }

    /// Iterate the member colors in turn order.
    pub fn iter(self) -> impl Iterator<Item = Color> {
        Color::ALL.into_iter().filter(move |c| self.contains(*c))
    }
}

impl From<Color> for ColorSet {
    #[inline]
    fn from(color: Color) -> ColorSet {
        ColorSet::single(color)
    }
}

impl BitOr for ColorSet {
    type Output = ColorSet;
    #[inline]
    fn bitor(self, rhs: ColorSet) -> ColorSet {
        ColorSet(self.0 | rhs.0)
    }
}

impl BitOrAssign for ColorSet {
    #[inline]
    fn bitor_assign(&mut self, rhs: ColorSet) {
        self.0 |= rhs.0;
    }
}

impl BitAnd for ColorSet {
    type Output = ColorSet;
    #[inline]
    fn bitand(self, rhs: ColorSet) -> ColorSet {
        ColorSet(self.0 & rhs.0)
    }
}

impl BitAndAssign for ColorSet {
    #[inline]
    fn bitand_assign(&mut self, rhs: ColorSet) {
        self.0 &= rhs.0;
    }
}

impl Not for ColorSet {
    type Output = ColorSet;
    #[inline]
    fn not(self) -> ColorSet {
        ColorSet(!self.0 & 0xF)
    }
}

impl std::fmt::Display for ColorSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for color in Color::ALL {
            if self.contains(color) {
                write!(f, "{}", color.to_char())?;
            } else {
                write!(f, ".")?;
            }
        }
        Ok(())
    }
}
