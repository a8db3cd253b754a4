//! Number attribute resolution
//!
//! Every number in 1..=49 carries a fixed zodiac, element, color, parity,
//! and size category. The assignments are domain constants: the three class
//! partitions are exhaustive over the 49-number domain, and each zodiac's
//! trait record lives in one static table rather than in per-instance types.

use serde::{Deserialize, Serialize};

use crate::error::{PredictionError, Result};
use crate::types::{MAX_NUMBER, MIN_NUMBER};

/// The twelve zodiac classes. Numbers map onto them cyclically: 1 is
/// Snake, 2 Dragon, ... 12 Horse, then the cycle repeats, so the class
/// containing 49 (Snake) has five members and every other class has four.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Zodiac {
    Rat,
    Ox,
    Tiger,
    Rabbit,
    Dragon,
    Snake,
    Horse,
    Goat,
    Monkey,
    Rooster,
    Dog,
    Pig,
}

impl Zodiac {
    pub const ALL: [Zodiac; 12] = [
        Zodiac::Rat,
        Zodiac::Ox,
        Zodiac::Tiger,
        Zodiac::Rabbit,
        Zodiac::Dragon,
        Zodiac::Snake,
        Zodiac::Horse,
        Zodiac::Goat,
        Zodiac::Monkey,
        Zodiac::Rooster,
        Zodiac::Dog,
        Zodiac::Pig,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        match self {
            Zodiac::Rat => "rat",
            Zodiac::Ox => "ox",
            Zodiac::Tiger => "tiger",
            Zodiac::Rabbit => "rabbit",
            Zodiac::Dragon => "dragon",
            Zodiac::Snake => "snake",
            Zodiac::Horse => "horse",
            Zodiac::Goat => "goat",
            Zodiac::Monkey => "monkey",
            Zodiac::Rooster => "rooster",
            Zodiac::Dog => "dog",
            Zodiac::Pig => "pig",
        }
    }

    pub fn traits(self) -> &'static ZodiacTraits {
        &ZODIAC_TRAITS[self.index()]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CelestialType {
    Sky,
    Earth,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum YinYang {
    Yin,
    Yang,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Season {
    Spring,
    Summer,
    Autumn,
    Winter,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    East,
    South,
    West,
    North,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gender {
    Male,
    Female,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Luck {
    Good,
    Bad,
}

/// Trait record for one zodiac class. Data, not behavior: populated from
/// the static table below, indexed by [`Zodiac::index`].
#[derive(Debug, Clone, Copy)]
pub struct ZodiacTraits {
    pub celestial: CelestialType,
    pub yin_yang: YinYang,
    pub season: Season,
    pub direction: Direction,
    pub gender: Gender,
    pub luck: Luck,
}

const ZODIAC_TRAITS: [ZodiacTraits; 12] = [
    // Rat
    ZodiacTraits {
        celestial: CelestialType::Earth,
        yin_yang: YinYang::Yin,
        season: Season::Winter,
        direction: Direction::North,
        gender: Gender::Male,
        luck: Luck::Bad,
    },
    // Ox
    ZodiacTraits {
        celestial: CelestialType::Earth,
        yin_yang: YinYang::Yang,
        season: Season::Winter,
        direction: Direction::North,
        gender: Gender::Male,
        luck: Luck::Bad,
    },
    // Tiger
    ZodiacTraits {
        celestial: CelestialType::Earth,
        yin_yang: YinYang::Yang,
        season: Season::Spring,
        direction: Direction::East,
        gender: Gender::Male,
        luck: Luck::Bad,
    },
    // Rabbit
    ZodiacTraits {
        celestial: CelestialType::Sky,
        yin_yang: YinYang::Yang,
        season: Season::Spring,
        direction: Direction::East,
        gender: Gender::Female,
        luck: Luck::Good,
    },
    // Dragon
    ZodiacTraits {
        celestial: CelestialType::Sky,
        yin_yang: YinYang::Yin,
        season: Season::Spring,
        direction: Direction::East,
        gender: Gender::Male,
        luck: Luck::Good,
    },
    // Snake
    ZodiacTraits {
        celestial: CelestialType::Earth,
        yin_yang: YinYang::Yin,
        season: Season::Summer,
        direction: Direction::South,
        gender: Gender::Female,
        luck: Luck::Good,
    },
    // Horse
    ZodiacTraits {
        celestial: CelestialType::Sky,
        yin_yang: YinYang::Yin,
        season: Season::Summer,
        direction: Direction::South,
        gender: Gender::Male,
        luck: Luck::Good,
    },
    // Goat
    ZodiacTraits {
        celestial: CelestialType::Earth,
        yin_yang: YinYang::Yang,
        season: Season::Summer,
        direction: Direction::South,
        gender: Gender::Female,
        luck: Luck::Good,
    },
    // Monkey
    ZodiacTraits {
        celestial: CelestialType::Sky,
        yin_yang: YinYang::Yang,
        season: Season::Autumn,
        direction: Direction::West,
        gender: Gender::Male,
        luck: Luck::Bad,
    },
    // Rooster
    ZodiacTraits {
        celestial: CelestialType::Earth,
        yin_yang: YinYang::Yang,
        season: Season::Autumn,
        direction: Direction::West,
        gender: Gender::Female,
        luck: Luck::Good,
    },
    // Dog
    ZodiacTraits {
        celestial: CelestialType::Earth,
        yin_yang: YinYang::Yin,
        season: Season::Autumn,
        direction: Direction::West,
        gender: Gender::Male,
        luck: Luck::Bad,
    },
    // Pig
    ZodiacTraits {
        celestial: CelestialType::Sky,
        yin_yang: YinYang::Yin,
        season: Season::Winter,
        direction: Direction::North,
        gender: Gender::Female,
        luck: Luck::Bad,
    },
];

/// The five elements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Element {
    Gold,
    Wood,
    Water,
    Fire,
    Earth,
}

impl Element {
    pub const ALL: [Element; 5] = [
        Element::Gold,
        Element::Wood,
        Element::Water,
        Element::Fire,
        Element::Earth,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        match self {
            Element::Gold => "gold",
            Element::Wood => "wood",
            Element::Water => "water",
            Element::Fire => "fire",
            Element::Earth => "earth",
        }
    }
}

/// The three wave colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Color {
    Red,
    Blue,
    Green,
}

impl Color {
    pub const ALL: [Color; 3] = [Color::Red, Color::Blue, Color::Green];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        match self {
            Color::Red => "red",
            Color::Blue => "blue",
            Color::Green => "green",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Parity {
    Odd,
    Even,
}

/// Small is 1..=24, big is 25..=49.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SizeCategory {
    Small,
    Big,
}

/// Derived attribute tuple for one number.
#[derive(Debug, Clone, Copy)]
pub struct AttributeSet {
    pub number: u8,
    pub zodiac: Zodiac,
    pub element: Element,
    pub color: Color,
    pub parity: Parity,
    pub size: SizeCategory,
}

impl AttributeSet {
    pub fn resolve(number: u8) -> Result<Self> {
        let zodiac = zodiac_for(number).ok_or(PredictionError::OutOfRange(number))?;
        let element = element_for(number).ok_or(PredictionError::OutOfRange(number))?;
        let color = color_for(number).ok_or(PredictionError::OutOfRange(number))?;
        Ok(Self {
            number,
            zodiac,
            element,
            color,
            parity: if number % 2 == 1 { Parity::Odd } else { Parity::Even },
            size: if number > 24 { SizeCategory::Big } else { SizeCategory::Small },
        })
    }
}

fn zodiac_for(number: u8) -> Option<Zodiac> {
    if !(MIN_NUMBER..=MAX_NUMBER).contains(&number) {
        return None;
    }
    let zodiac = match number % 12 {
        6 => Zodiac::Rat,
        5 => Zodiac::Ox,
        4 => Zodiac::Tiger,
        3 => Zodiac::Rabbit,
        2 => Zodiac::Dragon,
        1 => Zodiac::Snake,
        0 => Zodiac::Horse,
        11 => Zodiac::Goat,
        10 => Zodiac::Monkey,
        9 => Zodiac::Rooster,
        8 => Zodiac::Dog,
        _ => Zodiac::Pig,
    };
    Some(zodiac)
}

fn element_for(number: u8) -> Option<Element> {
    let element = match number {
        3 | 4 | 11 | 12 | 25 | 26 | 33 | 34 | 41 | 42 => Element::Gold,
        7 | 8 | 15 | 16 | 23 | 24 | 37 | 38 | 45 | 46 => Element::Wood,
        13 | 14 | 21 | 22 | 29 | 30 | 43 | 44 => Element::Water,
        1 | 2 | 9 | 10 | 17 | 18 | 31 | 32 | 39 | 40 | 47 | 48 => Element::Fire,
        5 | 6 | 19 | 20 | 27 | 28 | 35 | 36 | 49 => Element::Earth,
        _ => return None,
    };
    Some(element)
}

fn color_for(number: u8) -> Option<Color> {
    let color = match number {
        1 | 2 | 7 | 8 | 12 | 13 | 18 | 19 | 23 | 24 | 29 | 30 | 34 | 35 | 40 | 45 | 46 => {
            Color::Red
        }
        3 | 4 | 9 | 10 | 14 | 15 | 20 | 25 | 26 | 31 | 36 | 37 | 41 | 42 | 47 | 48 => Color::Blue,
        5 | 6 | 11 | 16 | 17 | 21 | 22 | 27 | 28 | 32 | 33 | 38 | 39 | 43 | 44 | 49 => {
            Color::Green
        }
        _ => return None,
    };
    Some(color)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_rejects_out_of_range() {
        assert!(matches!(
            AttributeSet::resolve(0),
            Err(PredictionError::OutOfRange(0))
        ));
        assert!(matches!(
            AttributeSet::resolve(50),
            Err(PredictionError::OutOfRange(50))
        ));
    }

    #[test]
    fn test_partition_is_total() {
        for n in MIN_NUMBER..=MAX_NUMBER {
            let attrs = AttributeSet::resolve(n).unwrap();
            assert_eq!(attrs.number, n);
        }
    }

    #[test]
    fn test_zodiac_class_sizes() {
        let mut counts: HashMap<Zodiac, usize> = HashMap::new();
        for n in MIN_NUMBER..=MAX_NUMBER {
            *counts.entry(AttributeSet::resolve(n).unwrap().zodiac).or_insert(0) += 1;
        }
        assert_eq!(counts.len(), 12);
        // 49 = 4 * 12 + 1; the extra number (49) lands on Snake.
        assert_eq!(counts[&Zodiac::Snake], 5);
        for zodiac in Zodiac::ALL {
            if zodiac != Zodiac::Snake {
                assert_eq!(counts[&zodiac], 4, "zodiac {:?}", zodiac);
            }
        }
    }

    #[test]
    fn test_element_class_sizes() {
        let mut counts = [0usize; 5];
        for n in MIN_NUMBER..=MAX_NUMBER {
            counts[AttributeSet::resolve(n).unwrap().element.index()] += 1;
        }
        assert_eq!(counts[Element::Gold.index()], 10);
        assert_eq!(counts[Element::Wood.index()], 10);
        assert_eq!(counts[Element::Water.index()], 8);
        assert_eq!(counts[Element::Fire.index()], 12);
        assert_eq!(counts[Element::Earth.index()], 9);
    }

    #[test]
    fn test_color_class_sizes() {
        let mut counts = [0usize; 3];
        for n in MIN_NUMBER..=MAX_NUMBER {
            counts[AttributeSet::resolve(n).unwrap().color.index()] += 1;
        }
        assert_eq!(counts[Color::Red.index()], 17);
        assert_eq!(counts[Color::Blue.index()], 16);
        assert_eq!(counts[Color::Green.index()], 16);
    }

    #[test]
    fn test_known_assignments() {
        let one = AttributeSet::resolve(1).unwrap();
        assert_eq!(one.zodiac, Zodiac::Snake);
        assert_eq!(one.element, Element::Fire);
        assert_eq!(one.color, Color::Red);
        assert_eq!(one.parity, Parity::Odd);
        assert_eq!(one.size, SizeCategory::Small);

        let forty_nine = AttributeSet::resolve(49).unwrap();
        assert_eq!(forty_nine.zodiac, Zodiac::Snake);
        assert_eq!(forty_nine.element, Element::Earth);
        assert_eq!(forty_nine.color, Color::Green);
        assert_eq!(forty_nine.size, SizeCategory::Big);

        let twelve = AttributeSet::resolve(12).unwrap();
        assert_eq!(twelve.zodiac, Zodiac::Horse);
        assert_eq!(twelve.parity, Parity::Even);
    }

    #[test]
    fn test_zodiac_traits_table() {
        let rat = Zodiac::Rat.traits();
        assert_eq!(rat.celestial, CelestialType::Earth);
        assert_eq!(rat.yin_yang, YinYang::Yin);
        assert_eq!(rat.season, Season::Winter);

        let rabbit = Zodiac::Rabbit.traits();
        assert_eq!(rabbit.celestial, CelestialType::Sky);
        assert_eq!(rabbit.gender, Gender::Female);
        assert_eq!(rabbit.luck, Luck::Good);
    }
}
