use serde::{Deserialize, Serialize};

/// Age categories in stacking order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Child,
    Adult,
    Elder,
}

impl Category {
    pub const ORDER: [Category; 3] = [Category::Child, Category::Adult, Category::Elder];

    pub fn index(self) -> usize {
        match self {
            Category::Child => 0,
            Category::Adult => 1,
            Category::Elder => 2,
        }
    }

    pub fn key(self) -> &'static str {
        match self {
            Category::Child => "child",
            Category::Adult => "adult",
            Category::Elder => "elder",
        }
    }

    /// Legend label.
    pub fn label(self) -> &'static str {
        match self {
            Category::Child => "儿童",
            Category::Adult => "成年",
            Category::Elder => "老年",
        }
    }
}

/// One province-year of the age-structure panel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PopulationRecord {
    pub province: String,
    pub year: String,
    pub child: f64,
    pub adult: f64,
    pub elder: f64,
}

impl PopulationRecord {
    pub fn values(&self) -> [f64; 3] {
        [self.child, self.adult, self.elder]
    }

    pub fn total(&self) -> f64 {
        self.child + self.adult + self.elder
    }
}

/// Male/female headcounts for one region-year. `male + female` is the total.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenderRecord {
    pub region: String,
    pub year: String,
    pub male: u64,
    pub female: u64,
}

impl GenderRecord {
    pub fn total(&self) -> u64 {
        self.male + self.female
    }
}
