use crate::block::Input;
use crate::order::{Fragment, Order};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::{BTreeMap, HashSet};

/// Token in a helper definition that gets replaced with the allocated
/// function name when the helper is registered.
pub const FUNCTION_NAME_PLACEHOLDER: &str = "%FUNCTION_NAME%";

static INT_LITERAL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*-?\d+\s*$").expect("integer literal pattern"));

/// True for an optionally-signed decimal integer literal (surrounding
/// whitespace allowed). Anything containing operators or identifiers fails,
/// which routes index translation to a runtime decrement instead of
/// compile-time folding.
pub fn is_integer_literal(text: &str) -> bool {
    INT_LITERAL.is_match(text)
}

/// Parses an index socket's text when it is a plain integer literal.
pub fn integer_literal_value(text: &str) -> Option<i64> {
    if is_integer_literal(text) {
        text.trim().parse().ok()
    } else {
        None
    }
}

/// Build context for one generated program.
///
/// Owns the two pieces of state emission needs: the name registry (every
/// allocated or user-declared name, so temporaries never collide anywhere in
/// the program) and the helper-function registry (definitions registered at
/// most once, keyed by a fixed key). Emitters take this by `&mut`; there is
/// no global state.
pub struct ArduinoGenerator {
    reserved: HashSet<String>,
    definitions: BTreeMap<String, HelperFunction>,
}

struct HelperFunction {
    name: String,
    code: String,
}

impl Default for ArduinoGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl ArduinoGenerator {
    pub fn new() -> Self {
        Self {
            reserved: HashSet::new(),
            definitions: BTreeMap::new(),
        }
    }

    /// Marks a user-declared name as taken so `distinct_name` never hands
    /// it out.
    pub fn reserve_name(&mut self, name: &str) {
        self.reserved.insert(name.to_string());
    }

    /// Returns `prefix` if it is still free, otherwise `prefix2`,
    /// `prefix3`, ... The returned name is recorded as taken for the rest
    /// of the program.
    pub fn distinct_name(&mut self, prefix: &str) -> String {
        if self.reserved.insert(prefix.to_string()) {
            return prefix.to_string();
        }
        let mut suffix = 2;
        loop {
            let candidate = format!("{}{}", prefix, suffix);
            if self.reserved.insert(candidate.clone()) {
                return candidate;
            }
            suffix += 1;
        }
    }

    /// Registers a helper-function definition once per program, keyed by
    /// `key`. `FUNCTION_NAME_PLACEHOLDER` in the lines is replaced with a
    /// collision-free real name. Asking again with the same key returns the
    /// name already allocated and registers nothing.
    pub fn provide_function(&mut self, key: &str, lines: &[&str]) -> String {
        if let Some(helper) = self.definitions.get(key) {
            return helper.name.clone();
        }
        let name = self.distinct_name(key);
        let code = lines.join("\n").replace(FUNCTION_NAME_PLACEHOLDER, &name);
        self.definitions.insert(
            key.to_string(),
            HelperFunction {
                name: name.clone(),
                code,
            },
        );
        name
    }

    pub fn helper_count(&self) -> usize {
        self.definitions.len()
    }

    /// Compiles a value socket to text usable in a context requiring at
    /// least `min_order`, wrapping in parentheses when the input binds too
    /// loosely. Returns `None` for an unplugged socket; call sites apply
    /// their own documented default.
    pub fn value_to_code(&self, input: &Input, min_order: Order) -> Option<String> {
        let fragment = self.compile_input(input)?;
        if fragment.order >= min_order {
            Some(fragment.code)
        } else {
            Some(format!("({})", fragment.code))
        }
    }

    fn compile_input(&self, input: &Input) -> Option<Fragment> {
        match input {
            Input::Variable(name) => Some(Fragment::new(name.clone(), Order::Atomic)),
            Input::Number(text) => {
                let order = if text.trim_start().starts_with('-') {
                    Order::Unary
                } else {
                    Order::Atomic
                };
                Some(Fragment::new(text.clone(), order))
            }
            Input::Code { code, order } => Some(Fragment::new(code.clone(), *order)),
            Input::Empty => None,
        }
    }

    /// Assembles the final sketch: registered helper definitions first
    /// (deterministic order), then the emitted statements inside `setup()`.
    pub fn render_sketch(&self, body: &str) -> String {
        let mut out = String::new();
        for helper in self.definitions.values() {
            out.push_str(&helper.code);
            out.push_str("\n\n");
        }
        out.push_str("void setup() {\n");
        for line in body.lines() {
            if line.is_empty() {
                out.push('\n');
            } else {
                out.push_str("  ");
                out.push_str(line);
                out.push('\n');
            }
        }
        out.push_str("}\n\nvoid loop() {\n}\n");
        out
    }
}
