/// How a subclass supplied after one has already been recorded is treated.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum SubclassPolicy {
    /// The first recorded subclass is permanent; later values are ignored.
    #[default]
    WriteOnce,
    /// A later level-up may replace the recorded subclass.
    Overwrite,
}

/// Rules constants and tunable parameters shared by both engines.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RulesConfig {
    pub subclass_policy: SubclassPolicy,

    /// Consult item names when an item lacks the explicit two-handed flag.
    /// Migration fallback for item data that predates the flag.
    pub two_handed_name_fallback: bool,

    /// Lowercase words that classify an item name as two-handed.
    pub two_handed_keywords: Vec<String>,
}

impl RulesConfig {
    // ===== compile-time constants =====
    /// Rarity rank multiplier in the auto-equip priority score.
    pub const RARITY_SCORE_WEIGHT: u64 = 1000;
    /// Highest spell level a slot table may describe.
    pub const MAX_SPELL_LEVEL: usize = 9;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_TWO_HANDED_KEYWORDS: [&'static str; 10] = [
        "two-handed",
        "greatsword",
        "greataxe",
        "greatclub",
        "maul",
        "halberd",
        "glaive",
        "pike",
        "longbow",
        "staff",
    ];

    pub fn new() -> Self {
        Self {
            subclass_policy: SubclassPolicy::default(),
            two_handed_name_fallback: true,
            two_handed_keywords: Self::DEFAULT_TWO_HANDED_KEYWORDS
                .iter()
                .map(|k| (*k).to_owned())
                .collect(),
        }
    }

    pub fn with_subclass_policy(mut self, policy: SubclassPolicy) -> Self {
        self.subclass_policy = policy;
        self
    }

    pub fn without_name_fallback(mut self) -> Self {
        self.two_handed_name_fallback = false;
        self
    }

    /// Returns true if `name` contains any configured two-handed keyword.
    ///
    /// Names and keywords are compared word by word, split on anything that
    /// is not alphanumeric. A single-word keyword also matches the tail of a
    /// compound word ("staff" in "Quarterstaff"), never its head or middle,
    /// so "pike" does not match "Spiked". A multi-word keyword such as
    /// "two-handed" must appear as consecutive words.
    pub fn name_suggests_two_handed(&self, name: &str) -> bool {
        let name = words(name);
        self.two_handed_keywords.iter().any(|keyword| {
            let keyword = words(keyword);
            let Some((head, rest)) = keyword.split_first() else {
                return false;
            };
            name.windows(keyword.len()).any(|window| {
                window[0].ends_with(head.as_str())
                    && window[1..].iter().zip(rest).all(|(w, k)| w == k)
            })
        })
    }
}

fn words(text: &str) -> Vec<String> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|word| !word.is_empty())
        .map(str::to_lowercase)
        .collect()
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self::new()
    }
}
