//! Flag registry — the fixed grammar of flags nvcc understands natively.
//!
//! Each rule pairs a string test with a disposition. Rules are listed in
//! priority order and the classifier takes the first match, so:
//!
//! 1. standalone flags and flags carrying an inline value,
//! 2. bare value flags whose value is the next token,
//! 3. any other dash-prefixed token (foreign),
//! 4. everything else (positional).
//!
//! Within tier 1 the exact names come before the joined prefixes so that
//! e.g. `-lib` is not read as `-l` with value `ib`.

/// What the classifier does with a token matched by a rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disposition {
    /// Native flag without a value (e.g. `-c`).
    Standalone,
    /// Native flag with its value in the same token (e.g. `-lfoo`, `--gpu-code=sm_20`).
    InlineValue,
    /// Native flag whose value is the next token (e.g. `-o out.o`).
    FollowingValue,
    /// Unknown flag, forwarded to the host compiler through the passthrough option.
    Foreign,
    /// Source file name.
    Positional,
}

/// String test applied to a single token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Matcher {
    /// Token equals the string.
    Exact(&'static str),
    /// Token starts with the string and has at least one more character.
    Joined(&'static str),
    /// Token is the string, `=`, and a non-empty value.
    WithEq(&'static str),
    /// Token is the string followed by one or more ASCII digits.
    Digits(&'static str),
    /// Token starts with the string.
    Prefix(&'static str),
    /// Matches every token.
    Any,
}

impl Matcher {
    pub fn matches(&self, token: &str) -> bool {
        match *self {
            Matcher::Exact(s) => token == s,
            Matcher::Joined(p) => token.len() > p.len() && token.starts_with(p),
            Matcher::WithEq(p) => token
                .strip_prefix(p)
                .and_then(|rest| rest.strip_prefix('='))
                .is_some_and(|value| !value.is_empty()),
            Matcher::Digits(p) => token
                .strip_prefix(p)
                .is_some_and(|rest| !rest.is_empty() && rest.bytes().all(|b| b.is_ascii_digit())),
            Matcher::Prefix(p) => token.starts_with(p),
            Matcher::Any => true,
        }
    }
}

/// A single grammar rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlagRule {
    pub matcher: Matcher,
    pub disposition: Disposition,
}

impl FlagRule {
    pub const fn new(matcher: Matcher, disposition: Disposition) -> Self {
        Self {
            matcher,
            disposition,
        }
    }

    pub fn matches(&self, token: &str) -> bool {
        self.matcher.matches(token)
    }
}

/// No-value flags, long and short spellings.
const STANDALONE_FLAGS: &[&str] = &[
    "-c",
    "--compile",
    "-E",
    "--preprocess",
    "-M",
    "--generate-dependencies",
    "-g",
    "--debug",
    "-G",
    "--device-debug",
    "-lineinfo",
    "--generate-line-info",
    "-v",
    "--verbose",
    "-deviceemu",
    "--device-emulation",
    "-use_fast_math",
    "--use_fast_math",
    "-shared",
    "--shared",
    "-lib",
    "--lib",
    "-link",
    "--link",
    "-dc",
    "--device-c",
    "-cubin",
    "--cubin",
    "-ptx",
    "--ptx",
    "-fatbin",
    "--fatbin",
    "-keep",
    "--keep",
    "-w",
    "--disable-warnings",
];

/// Single-letter value flags written without a separator (`-lfoo`, `-I/usr/include`).
const JOINED_SHORT_FLAGS: &[&str] = &["-o", "-l", "-L", "-I", "-D", "-U"];

/// Single-letter value flags whose inline value is numeric only (`-O2`, `-m64`).
const DIGIT_SHORT_FLAGS: &[&str] = &["-O", "-m"];

/// Value flags spelled `name=value` inline or `name value` as two tokens.
///
/// The single-dash entries are nvcc's short spellings of the long forms.
const VALUE_FLAGS: &[&str] = &[
    "--output-file",
    "--library",
    "--library-path",
    "--include-path",
    "--system-include",
    "-isystem",
    "--pre-include",
    "-include",
    "--define-macro",
    "--undefine-macro",
    "--optimize",
    "--machine",
    "--output-directory",
    "--compiler-bindir",
    "-ccbin",
    "--gpu-architecture",
    "-arch",
    "--gpu-code",
    "-code",
    "--generate-code",
    "-gencode",
    "--maxrregcount",
    "-maxrregcount",
    "--ftz",
    "-ftz",
    "--prec-div",
    "-prec-div",
    "--prec-sqrt",
    "-prec-sqrt",
    "--fmad",
    "-fmad",
    "--compiler-options",
    "-Xcompiler",
    "--linker-options",
    "-Xlinker",
    "--x",
    "-x",
];

/// Build the complete rule table in priority order.
pub fn flag_rules() -> Vec<FlagRule> {
    let mut rules = Vec::new();

    // === Tier 1: standalone and inline-value ===
    rules.extend(
        STANDALONE_FLAGS
            .iter()
            .map(|&f| FlagRule::new(Matcher::Exact(f), Disposition::Standalone)),
    );
    rules.extend(
        VALUE_FLAGS
            .iter()
            .map(|&f| FlagRule::new(Matcher::WithEq(f), Disposition::InlineValue)),
    );
    rules.extend(
        JOINED_SHORT_FLAGS
            .iter()
            .map(|&f| FlagRule::new(Matcher::Joined(f), Disposition::InlineValue)),
    );
    rules.extend(
        DIGIT_SHORT_FLAGS
            .iter()
            .map(|&f| FlagRule::new(Matcher::Digits(f), Disposition::InlineValue)),
    );

    // === Tier 2: value in the next token ===
    rules.extend(
        VALUE_FLAGS
            .iter()
            .chain(JOINED_SHORT_FLAGS)
            .map(|&f| FlagRule::new(Matcher::Exact(f), Disposition::FollowingValue)),
    );

    // === Tier 3/4: catch-alls ===
    rules.push(FlagRule::new(Matcher::Prefix("-"), Disposition::Foreign));
    rules.push(FlagRule::new(Matcher::Any, Disposition::Positional));

    rules
}

/// Look up the disposition of a token (first matching rule wins).
pub fn disposition_of(rules: &[FlagRule], token: &str) -> Disposition {
    rules
        .iter()
        .find(|r| r.matches(token))
        .map(|r| r.disposition)
        .unwrap_or(Disposition::Positional)
}
