//! Structural pretty-printer producing canonical snapshot text.

use super::plugin::Plugin;
use super::value::Value;
use regex::Regex;
use std::sync::OnceLock;

/// Options for the structural printer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatConfig {
    /// Escape regex metacharacters when printing regular expressions
    pub escape_regex: bool,
    /// Backslash-escape `"` and `\` inside strings
    pub escape_string: bool,
    /// Print `[Function name]` instead of `[Function]`
    pub print_function_name: bool,
    /// Spaces per nesting level
    pub indent: usize,
    /// Containers nested deeper than this print as `[Type]`
    pub max_depth: Option<usize>,
}

impl Default for FormatConfig {
    fn default() -> Self {
        Self {
            escape_regex: true,
            escape_string: true,
            print_function_name: false,
            indent: 2,
            max_depth: None,
        }
    }
}

impl FormatConfig {
    /// Create the snapshot defaults
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set regex escaping
    #[must_use]
    pub const fn with_escape_regex(mut self, escape: bool) -> Self {
        self.escape_regex = escape;
        self
    }

    /// Set function name printing
    #[must_use]
    pub const fn with_print_function_name(mut self, print: bool) -> Self {
        self.print_function_name = print;
        self
    }

    /// Set indentation width
    #[must_use]
    pub const fn with_indent(mut self, indent: usize) -> Self {
        self.indent = indent;
        self
    }

    /// Set maximum depth
    #[must_use]
    pub const fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = Some(depth);
        self
    }
}

/// Serializes [`Value`]s to deterministic text
///
/// Holds the printer configuration and the ordered plugin list. The same
/// formatter must be used for every session against a snapshot file, since
/// a different plugin set changes the canonical text.
pub struct Formatter {
    config: FormatConfig,
    plugins: Vec<Box<dyn Plugin>>,
}

impl Default for Formatter {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Formatter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Formatter")
            .field("config", &self.config)
            .field("plugins", &self.plugins.len())
            .finish()
    }
}

impl Formatter {
    /// Formatter with default configuration and no plugins
    #[must_use]
    pub fn new() -> Self {
        Self {
            config: FormatConfig::default(),
            plugins: Vec::new(),
        }
    }

    /// Replace the configuration
    #[must_use]
    pub fn with_config(mut self, config: FormatConfig) -> Self {
        self.config = config;
        self
    }

    /// Append a plugin; earlier plugins take precedence
    #[must_use]
    pub fn with_plugin(mut self, plugin: impl Plugin + 'static) -> Self {
        self.plugins.push(Box::new(plugin));
        self
    }

    /// Current configuration
    #[must_use]
    pub const fn config(&self) -> &FormatConfig {
        &self.config
    }

    /// Number of registered plugins
    #[must_use]
    pub fn plugin_count(&self) -> usize {
        self.plugins.len()
    }

    /// Print a value with the structural printer (no line-break handling)
    #[must_use]
    pub fn format(&self, value: &Value) -> String {
        Printer { formatter: self }.print(value, "", 0)
    }
}

/// Recursion handle passed to plugins
#[derive(Debug)]
pub struct Printer<'a> {
    formatter: &'a Formatter,
}

impl Printer<'_> {
    /// Print a child value through the plugin chain
    #[must_use]
    pub fn print(&self, value: &Value, indentation: &str, depth: usize) -> String {
        for plugin in &self.formatter.plugins {
            if plugin.test(value) {
                return plugin.serialize(value, self, indentation, depth);
            }
        }
        self.print_basic(value, indentation, depth)
    }

    /// Indentation for lines one level below `indentation`
    #[must_use]
    pub fn indent_next(&self, indentation: &str) -> String {
        format!("{indentation}{}", " ".repeat(self.formatter.config.indent))
    }

    /// Printer configuration
    #[must_use]
    pub const fn config(&self) -> &FormatConfig {
        &self.formatter.config
    }

    fn print_basic(&self, value: &Value, indentation: &str, depth: usize) -> String {
        let config = &self.formatter.config;
        match value {
            Value::Undefined => "undefined".to_string(),
            Value::Null => "null".to_string(),
            Value::Bool(b) => b.to_string(),
            Value::Int(i) => i.to_string(),
            Value::UInt(u) => u.to_string(),
            Value::Float(f) => format_float(*f),
            Value::String(s) => {
                if config.escape_string {
                    format!("\"{}\"", escape_string(s))
                } else {
                    format!("\"{s}\"")
                }
            }
            Value::Symbol(description) => format!("Symbol({description})"),
            Value::Regex { source, flags } => {
                let text = format!("/{source}/{flags}");
                if config.escape_regex {
                    escape_regex(&text)
                } else {
                    text
                }
            }
            Value::Function { name } => {
                if config.print_function_name {
                    format!("[Function {}]", name.as_deref().unwrap_or("anonymous"))
                } else {
                    "[Function]".to_string()
                }
            }
            Value::Error { name, message } => format!("[{}]", error_to_string(name, message)),
            Value::Date(at) => at.format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string(),
            Value::Array(items) => self.container(value, depth, |depth| {
                format!("Array [{}]", self.list_items(items.iter(), indentation, depth))
            }),
            Value::Set(items) => self.container(value, depth, |depth| {
                format!("Set {{{}}}", self.list_items(items.iter(), indentation, depth))
            }),
            Value::Object { fields, .. } => self.container(value, depth, |depth| {
                let mut sorted: Vec<&(String, Value)> = fields.iter().collect();
                sorted.sort_by(|a, b| a.0.cmp(&b.0));
                let next = self.indent_next(indentation);
                let lines = sorted.iter().map(|(key, field)| {
                    let key = self.print(&Value::String(key.clone()), &next, depth);
                    format!("{key}: {}", self.print(field, &next, depth))
                });
                format!("{} {{{}}}", value.type_name(), self.block(lines, indentation))
            }),
            Value::Map(entries) => self.container(value, depth, |depth| {
                let next = self.indent_next(indentation);
                let lines = entries.iter().map(|(key, entry)| {
                    format!(
                        "{} => {}",
                        self.print(key, &next, depth),
                        self.print(entry, &next, depth)
                    )
                });
                format!("Map {{{}}}", self.block(lines, indentation))
            }),
        }
    }

    /// Enter a container, or print `[Type]` once past the depth limit
    fn container(&self, value: &Value, depth: usize, render: impl FnOnce(usize) -> String) -> String {
        let depth = depth + 1;
        if self
            .formatter
            .config
            .max_depth
            .is_some_and(|max| depth > max)
        {
            return format!("[{}]", value.type_name());
        }
        render(depth)
    }

    fn list_items<'v>(
        &self,
        items: impl Iterator<Item = &'v Value>,
        indentation: &str,
        depth: usize,
    ) -> String {
        let next = self.indent_next(indentation);
        let lines = items.map(|item| self.print(item, &next, depth));
        self.block(lines, indentation)
    }

    /// One line per item with a trailing comma, or nothing when empty
    fn block(&self, lines: impl Iterator<Item = String>, indentation: &str) -> String {
        let next = self.indent_next(indentation);
        let mut out = String::new();
        for line in lines {
            out.push('\n');
            out.push_str(&next);
            out.push_str(&line);
            out.push(',');
        }
        if !out.is_empty() {
            out.push('\n');
            out.push_str(indentation);
        }
        out
    }
}

/// Number text matching the canonical decimal form of snapshot files
fn format_float(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if value == 0.0 {
        return if value.is_sign_negative() { "-0" } else { "0" }.to_string();
    }
    let magnitude = value.abs();
    if (1e-6..1e21).contains(&magnitude) {
        return value.to_string();
    }
    let exp = format!("{value:e}");
    match exp.split_once('e') {
        Some((mantissa, power)) if !power.starts_with('-') => format!("{mantissa}e+{power}"),
        _ => exp,
    }
}

fn escape_string(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}

fn escape_regex(text: &str) -> String {
    static META: OnceLock<Regex> = OnceLock::new();
    let meta = META.get_or_init(|| Regex::new(r"[\\^$*+?.()|\[\]{}]").expect("valid regex"));
    meta.replace_all(text, r"\${0}").into_owned()
}

fn error_to_string(name: &str, message: &str) -> String {
    match (name.is_empty(), message.is_empty()) {
        (_, true) => name.to_string(),
        (true, false) => message.to_string(),
        (false, false) => format!("{name}: {message}"),
    }
}
