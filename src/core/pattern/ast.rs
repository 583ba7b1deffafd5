//! Pattern AST produced by the message grammar.

/// A parsed message pattern: an ordered run of elements.
pub type Pattern = Vec<Element>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Element {
    /// Literal text, with quoting already removed.
    Text(String),
    /// `{name}`
    Argument(String),
    /// `{name, number[, style]}`
    Number { name: String, style: NumberStyle },
    /// `{name, date[, style]}`
    Date { name: String, style: DateTimeStyle },
    /// `{name, time[, style]}`
    Time { name: String, style: DateTimeStyle },
    /// `{name, plural, ...}` or `{name, selectordinal, ...}`
    Plural {
        name: String,
        ordinal: bool,
        offset: u32,
        options: Vec<PluralOption>,
    },
    /// `{name, select, ...}`
    Select {
        name: String,
        options: Vec<SelectOption>,
    },
    /// `#` inside a plural option: the plural value minus its offset.
    PluralValue,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NumberStyle {
    #[default]
    Decimal,
    Integer,
    Percent,
    Currency,
}

impl NumberStyle {
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "integer" => Some(Self::Integer),
            "percent" => Some(Self::Percent),
            "currency" => Some(Self::Currency),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DateTimeStyle {
    Short,
    #[default]
    Medium,
    Long,
    Full,
}

impl DateTimeStyle {
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "short" => Some(Self::Short),
            "medium" => Some(Self::Medium),
            "long" => Some(Self::Long),
            "full" => Some(Self::Full),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PluralOption {
    pub selector: PluralSelector,
    pub value: Pattern,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PluralSelector {
    /// `=N`
    Exact(u64),
    /// `zero`, `one`, `two`, `few`, `many` or `other`
    Category(String),
}

impl PluralSelector {
    pub const CATEGORIES: [&'static str; 6] = ["zero", "one", "two", "few", "many", "other"];

    pub fn is_other(&self) -> bool {
        matches!(self, PluralSelector::Category(c) if c == "other")
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
    pub key: String,
    pub value: Pattern,
}
