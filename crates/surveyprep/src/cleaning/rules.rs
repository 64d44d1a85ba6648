//! The survey canonicalization rule set.
//!
//! Each entry is data: a column name, how raw text is normalized before
//! comparison, an ordered list of variant rules, and the vocabulary policy.
//! Variants are written lower-case; comparison lower-cases the input.

use indexmap::IndexMap;
use once_cell::sync::Lazy;

/// How a raw cell is normalized before rule lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Normalization {
    /// Strip leading and trailing whitespace.
    Trim,
    /// Strip all whitespace.
    Compact,
}

impl Normalization {
    pub fn apply(&self, raw: &str) -> String {
        match self {
            Normalization::Trim => raw.trim().to_lowercase(),
            Normalization::Compact => raw
                .chars()
                .filter(|c| !c.is_whitespace())
                .collect::<String>()
                .to_lowercase(),
        }
    }
}

/// What a matched variant is rewritten to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    Label(&'static str),
    Missing,
}

/// A set of raw variants and the value they become.
#[derive(Debug, Clone)]
pub struct Rule {
    pub variants: &'static [&'static str],
    pub target: Target,
}

/// Which values survive when no rule matched.
#[derive(Debug, Clone)]
pub enum Vocabulary {
    /// Only these labels are legal; anything else becomes missing.
    Closed(&'static [&'static str]),
    /// Unmatched values pass through untouched.
    Open,
}

/// Canonicalization rules for one column.
#[derive(Debug, Clone)]
pub struct ColumnRules {
    pub column: &'static str,
    pub normalization: Normalization,
    pub rules: Vec<Rule>,
    pub vocabulary: Vocabulary,
    /// Inclusive numeric bounds. When set, cells are parsed as numbers.
    pub range: Option<(f64, f64)>,
}

impl ColumnRules {
    fn closed(column: &'static str, labels: &'static [&'static str]) -> Self {
        Self {
            column,
            normalization: Normalization::Trim,
            rules: Vec::new(),
            vocabulary: Vocabulary::Closed(labels),
            range: None,
        }
    }

    fn open(column: &'static str) -> Self {
        Self {
            column,
            normalization: Normalization::Trim,
            rules: Vec::new(),
            vocabulary: Vocabulary::Open,
            range: None,
        }
    }

    fn bounded(column: &'static str, min: f64, max: f64) -> Self {
        Self {
            range: Some((min, max)),
            ..Self::open(column)
        }
    }

    fn compact(mut self) -> Self {
        self.normalization = Normalization::Compact;
        self
    }

    fn map(mut self, variants: &'static [&'static str], label: &'static str) -> Self {
        self.rules.push(Rule {
            variants,
            target: Target::Label(label),
        });
        self
    }

    fn invalid(mut self, variants: &'static [&'static str]) -> Self {
        self.rules.push(Rule {
            variants,
            target: Target::Missing,
        });
        self
    }

    /// Labels of a closed vocabulary, empty for open ones.
    pub fn labels(&self) -> &'static [&'static str] {
        match self.vocabulary {
            Vocabulary::Closed(labels) => labels,
            Vocabulary::Open => &[],
        }
    }
}

/// Immutable map from column name to its rules.
#[derive(Debug, Clone, Default)]
pub struct RuleSet {
    columns: IndexMap<&'static str, ColumnRules>,
}

impl RuleSet {
    pub fn new(columns: Vec<ColumnRules>) -> Self {
        Self {
            columns: columns.into_iter().map(|c| (c.column, c)).collect(),
        }
    }

    pub fn get(&self, column: &str) -> Option<&ColumnRules> {
        self.columns.get(column)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ColumnRules> {
        self.columns.values()
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

// ============================================================================
// Vocabularies
// ============================================================================

const YES_NO: &[&str] = &["Yes", "No"];
const YES_NO_DONT_KNOW: &[&str] = &["Yes", "No", "Don't know"];
const YES_NO_MAYBE: &[&str] = &["Yes", "No", "Maybe"];
const YES_NO_SOME: &[&str] = &["Yes", "No", "Some of them"];
const YES_NO_NOT_SURE: &[&str] = &["Yes", "No", "Not Sure"];
const GENDERS: &[&str] = &["Male", "Female", "Non-Binary"];
const FREQUENCIES: &[&str] = &["Never", "Rarely", "Sometimes", "Often"];
const COMPANY_SIZES: &[&str] = &["1-5", "6-25", "26-100", "100-500", "500-1000", "1000+"];
const LEAVE_EASE: &[&str] = &[
    "Very easy",
    "Somewhat easy",
    "Somewhat difficult",
    "Very difficult",
    "Don't know",
];

/// Columns frozen to categoricals after cleaning, in survey order.
pub const CATEGORICAL_COLUMNS: &[&str] = &[
    "Gender",
    "Country",
    "self_employed",
    "family_history",
    "treatment",
    "work_interfere",
    "no_employees",
    "remote_work",
    "tech_company",
    "benefits",
    "care_options",
    "wellness_program",
    "seek_help",
    "anonymity",
    "leave",
    "mental_health_consequence",
    "phys_health_consequence",
    "coworkers",
    "supervisor",
    "mental_health_interview",
    "phys_health_interview",
    "mental_vs_physical",
    "obs_consequence",
];

/// Count columns read as nullable integers after cleaning.
pub const COUNT_COLUMNS: &[&str] = &[
    "Years_in_Tech",
    "Years_in_Current_Role",
    "Sick_Leave_Days",
    "Average_Weekly_Hours",
];

/// Plausible respondent ages, inclusive.
pub const AGE_RANGE: (f64, f64) = (18.0, 72.0);

// ============================================================================
// Survey rules
// ============================================================================

/// The rule set for the mental-health-in-tech survey.
pub static SURVEY_RULES: Lazy<RuleSet> = Lazy::new(|| {
    RuleSet::new(vec![
        ColumnRules::bounded("Age", AGE_RANGE.0, AGE_RANGE.1),
        ColumnRules::closed("Gender", GENDERS)
            .map(
                &[
                    "m",
                    "male-ish",
                    "maile",
                    "something kinda male?",
                    "male",
                    "cis male",
                    "mal",
                    "male (cis)",
                    "make",
                    "guy (-ish) ^_^",
                    "male leaning androgynous",
                    "man",
                    "mail",
                    "malr",
                    "cis man",
                    "ostensibly male, unsure what that really means",
                ],
                "Male",
            )
            .map(
                &[
                    "female",
                    "cis female",
                    "f",
                    "woman",
                    "femake",
                    "cis-female/femme",
                    "female (cis)",
                    "femail",
                ],
                "Female",
            )
            .map(
                &[
                    "trans-female",
                    "queer/she/they",
                    "non-binary",
                    "genderqueer",
                    "androgyne",
                    "agender",
                    "trans woman",
                    "neuter",
                    "female (trans)",
                    "queer",
                ],
                "Non-Binary",
            ),
        ColumnRules::open("Country")
            .map(&["usa"], "United States")
            .map(&["germant"], "Germany")
            .map(&["russiaaaaa"], "Russia")
            .map(&["bahamas, the"], "Bahamas")
            .map(&["bulgarria"], "Bulgaria")
            .map(&["canada"], "Canada")
            .map(&["uk", "united kingdom"], "United Kingdom"),
        ColumnRules::closed("self_employed", YES_NO)
            .map(&["yes", "y"], "Yes")
            .map(&["no", "n"], "No"),
        ColumnRules::closed("family_history", YES_NO)
            .map(&["yes", "y", "yyy"], "Yes")
            .map(&["no", "n", "nnnn"], "No"),
        ColumnRules::closed("treatment", YES_NO),
        ColumnRules::closed("work_interfere", FREQUENCIES)
            .map(&["oftem"], "Often")
            .map(&["sometimem"], "Sometimes")
            .invalid(&["c"]),
        ColumnRules::closed("no_employees", COMPANY_SIZES)
            .compact()
            .map(&["25-jun"], "6-25")
            .map(&["5-jan", "05-jan"], "1-5")
            .map(&["morethan1000"], "1000+"),
        ColumnRules::closed("remote_work", YES_NO)
            .map(&["yes", "y"], "Yes")
            .map(&["no", "n"], "No"),
        ColumnRules::closed("tech_company", YES_NO).map(&["y"], "Yes"),
        ColumnRules::closed("benefits", YES_NO)
            .map(&["no", "n"], "No")
            .map(&["yes", "y"], "Yes"),
        ColumnRules::closed("care_options", YES_NO_NOT_SURE)
            .map(&["y", "yess", "yesss"], "Yes")
            .map(&["nop", "nos", "n", "not"], "No")
            .map(&["ns", "not sure"], "Not Sure"),
        ColumnRules::closed("wellness_program", YES_NO_DONT_KNOW)
            .map(&["yess"], "Yes")
            .map(&["n", "no"], "No")
            .invalid(&["'''", "'''''", "###", "####", "##3", "0", "?"]),
        ColumnRules::closed("seek_help", YES_NO_DONT_KNOW)
            .map(&["no.", "nos", "nop", "nowise"], "No"),
        ColumnRules::closed("anonymity", YES_NO_DONT_KNOW).invalid(&["jnows", "###", "-"]),
        ColumnRules::closed("leave", LEAVE_EASE)
            .invalid(&[
                "//c difficult",
                "option c",
                "option c difficult",
                "// easy",
                "//c",
                "#not easy",
            ])
            .map(&["don't know~"], "Don't know")
            .map(&["somewhat difficultn"], "Somewhat difficult")
            .map(&["very_easy", "#very easy"], "Very easy"),
        ColumnRules::closed("mental_health_consequence", YES_NO_MAYBE).invalid(&["?"]),
        ColumnRules::closed("phys_health_consequence", YES_NO_MAYBE)
            .invalid(&["?"])
            .map(&["not"], "No")
            .map(&["maybee"], "Maybe"),
        ColumnRules::closed("coworkers", YES_NO_SOME)
            .invalid(&["@", "c"])
            .map(&["yess"], "Yes")
            .map(&["sot"], "Some of them"),
        ColumnRules::closed("supervisor", YES_NO_SOME)
            .map(&["n0", "no.", "n", "/n"], "No")
            .map(&["/y"], "Yes")
            .invalid(&["////"]),
        ColumnRules::closed("mental_health_interview", YES_NO_MAYBE)
            .map(
                &["nope", "nat", "nnn", "n", "no-no", "nn", "n0", "not"],
                "No",
            )
            .invalid(&["0", "=", "oo", "o"]),
        ColumnRules::closed("phys_health_interview", YES_NO_MAYBE)
            .invalid(&["vvvvv", "^^6", "^^^", "^^^6", "tt"])
            .map(&["ys"], "Yes")
            .map(&["nop", "nos", "n", "not", "n0", "no-n", "nat"], "No")
            .map(&["may be", "maybe?"], "Maybe"),
        ColumnRules::closed("mental_vs_physical", YES_NO_DONT_KNOW)
            .invalid(&["nil", "!!!!!", "t know", "!!!!"])
            .map(&["don't know!", "don't"], "Don't know")
            .map(&["nat", "no.", "noz", "not"], "No"),
        ColumnRules::closed("obs_consequence", YES_NO).invalid(&["tt"]),
    ])
});
