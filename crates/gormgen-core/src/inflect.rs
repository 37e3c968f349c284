//! English pluralisation, used to decide whether a table name is already
//! plural.
//!
//! The rule tables follow the Rails inflector. Rules are tried in order and
//! the first match wins; each regular rule is tried upper-case first, then as
//! written, then case-insensitively.

use std::sync::LazyLock;

use regex::Regex;

const UNCOUNTABLE: &[&str] = &[
    "equipment",
    "information",
    "rice",
    "money",
    "species",
    "series",
    "fish",
    "sheep",
    "jeans",
    "police",
];

const IRREGULAR: &[(&str, &str)] = &[
    ("person", "people"),
    ("man", "men"),
    ("child", "children"),
    ("sex", "sexes"),
    ("move", "moves"),
    ("mombie", "mombies"),
];

// Listed from most general to most specific; applied in reverse.
const PLURAL: &[(&str, &str)] = &[
    ("([a-z])$", "${1}s"),
    ("s$", "s"),
    ("^(ax|test)is$", "${1}es"),
    ("(octop|vir)us$", "${1}i"),
    ("(octop|vir)i$", "${1}i"),
    ("(alias|status|campus)$", "${1}es"),
    ("(bu)s$", "${1}ses"),
    ("(buffal|tomat)o$", "${1}oes"),
    ("([ti])um$", "${1}a"),
    ("([ti])a$", "${1}a"),
    ("sis$", "ses"),
    ("(?:([^f])fe|([lr])f)$", "${1}${2}ves"),
    ("(hive)$", "${1}s"),
    ("([^aeiouy]|qu)y$", "${1}ies"),
    ("(x|ch|ss|sh)$", "${1}es"),
    ("(matr|vert|ind)(?:ix|ex)$", "${1}ices"),
    ("^(m|l)ouse$", "${1}ice"),
    ("^(m|l)ice$", "${1}ice"),
    ("^(ox)$", "${1}en"),
    ("^(oxen)$", "${1}"),
    ("(quiz)$", "${1}zes"),
];

struct Rule {
    pattern: Regex,
    replacement: String,
}

impl Rule {
    fn new(pattern: &str, replacement: impl Into<String>) -> Self {
        Self {
            pattern: Regex::new(pattern).expect("Invalid inflection rule regex"),
            replacement: replacement.into(),
        }
    }
}

static PLURAL_RULES: LazyLock<Vec<Rule>> = LazyLock::new(|| {
    let mut rules = Vec::new();

    for word in UNCOUNTABLE {
        rules.push(Rule::new(&format!("^(?i)({word})$"), "${1}"));
    }

    for (singular, plural) in IRREGULAR {
        rules.push(Rule::new(
            &format!("{}$", singular.to_uppercase()),
            plural.to_uppercase(),
        ));
        rules.push(Rule::new(&format!("{}$", title(singular)), title(plural)));
        rules.push(Rule::new(&format!("{singular}$"), *plural));
    }

    for (find, replace) in PLURAL.iter().rev() {
        rules.push(Rule::new(&find.to_uppercase(), replace.to_uppercase()));
        rules.push(Rule::new(find, *replace));
        rules.push(Rule::new(&format!("(?i){find}"), *replace));
    }

    rules
});

fn title(word: &str) -> String {
    let mut chars = word.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}

/// Returns the plural form of `word`, or `word` unchanged when no rule
/// applies.
#[must_use]
pub fn pluralize(word: &str) -> String {
    PLURAL_RULES
        .iter()
        .find(|rule| rule.pattern.is_match(word))
        .map_or_else(
            || word.to_string(),
            |rule| {
                rule.pattern
                    .replace_all(word, rule.replacement.as_str())
                    .into_owned()
            },
        )
}

/// Returns true if `word` equals its own plural form.
#[must_use]
pub fn is_plural(word: &str) -> bool {
    pluralize(word) == word
}
