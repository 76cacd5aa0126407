//! Sexagenary (stem-branch) year cycle.

use serde::{Deserialize, Serialize};

/// First year of a cycle: Wood Rat
pub const CYCLE_ANCHOR_YEAR: i32 = 1984;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChineseAnimal {
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

impl ChineseAnimal {
    pub const ALL: [ChineseAnimal; 12] = [
        ChineseAnimal::Rat,
        ChineseAnimal::Ox,
        ChineseAnimal::Tiger,
        ChineseAnimal::Rabbit,
        ChineseAnimal::Dragon,
        ChineseAnimal::Snake,
        ChineseAnimal::Horse,
        ChineseAnimal::Goat,
        ChineseAnimal::Monkey,
        ChineseAnimal::Rooster,
        ChineseAnimal::Dog,
        ChineseAnimal::Pig,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ChineseAnimal::Rat => "Rat",
            ChineseAnimal::Ox => "Ox",
            ChineseAnimal::Tiger => "Tiger",
            ChineseAnimal::Rabbit => "Rabbit",
            ChineseAnimal::Dragon => "Dragon",
            ChineseAnimal::Snake => "Snake",
            ChineseAnimal::Horse => "Horse",
            ChineseAnimal::Goat => "Goat",
            ChineseAnimal::Monkey => "Monkey",
            ChineseAnimal::Rooster => "Rooster",
            ChineseAnimal::Dog => "Dog",
            ChineseAnimal::Pig => "Pig",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChineseElement {
    Wood,
    Fire,
    Earth,
    Metal,
    Water,
}

impl ChineseElement {
    pub const ALL: [ChineseElement; 5] = [
        ChineseElement::Wood,
        ChineseElement::Fire,
        ChineseElement::Earth,
        ChineseElement::Metal,
        ChineseElement::Water,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ChineseElement::Wood => "Wood",
            ChineseElement::Fire => "Fire",
            ChineseElement::Earth => "Earth",
            ChineseElement::Metal => "Metal",
            ChineseElement::Water => "Water",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Polarity {
    Yang,
    Yin,
}

const STEMS: [&str; 10] = ["Jia", "Yi", "Bing", "Ding", "Wu", "Ji", "Geng", "Xin", "Ren", "Gui"];
const BRANCHES: [&str; 12] = [
    "Zi", "Chou", "Yin", "Mao", "Chen", "Si", "Wu", "Wei", "Shen", "You", "Xu", "Hai",
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChineseZodiac {
    pub animal: ChineseAnimal,
    pub element: ChineseElement,
    pub polarity: Polarity,
    pub stem: String,
    pub branch: String,
    /// 1-60, 1 being Wood Rat
    pub cycle_position: u8,
}

impl ChineseZodiac {
    /// Sign of a Gregorian year. The lunar new year boundary is not applied.
    pub fn for_year(year: i32) -> Self {
        let offset = (year - CYCLE_ANCHOR_YEAR).rem_euclid(60) as usize;
        let stem = offset % 10;
        let branch = offset % 12;
        Self {
            animal: ChineseAnimal::ALL[branch],
            element: ChineseElement::ALL[stem / 2],
            polarity: if stem % 2 == 0 { Polarity::Yang } else { Polarity::Yin },
            stem: STEMS[stem].to_string(),
            branch: BRANCHES[branch].to_string(),
            cycle_position: offset as u8 + 1,
        }
    }

    pub fn description(&self) -> String {
        format!("{} {}", self.element.name(), self.animal.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_anchor_year() {
        let z = ChineseZodiac::for_year(1984);
        assert_eq!(z.animal, ChineseAnimal::Rat);
        assert_eq!(z.element, ChineseElement::Wood);
        assert_eq!(z.polarity, Polarity::Yang);
        assert_eq!(z.cycle_position, 1);
        assert_eq!(z.description(), "Wood Rat");
    }

    #[test]
    fn test_known_years() {
        assert_eq!(ChineseZodiac::for_year(2000).description(), "Metal Dragon");
        assert_eq!(ChineseZodiac::for_year(1990).description(), "Metal Horse");
        assert_eq!(ChineseZodiac::for_year(2023).description(), "Water Rabbit");
        assert_eq!(ChineseZodiac::for_year(2023).polarity, Polarity::Yin);
    }

    #[test]
    fn test_years_before_anchor() {
        let z = ChineseZodiac::for_year(1983);
        assert_eq!(z.cycle_position, 60);
        assert_eq!(z.description(), "Water Pig");
        assert_eq!(ChineseZodiac::for_year(1924), ChineseZodiac::for_year(1984));
    }
}
