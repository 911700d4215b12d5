//! Template registry: named renderers plus the filter table templates use.

use crate::error::{Error, Result};
use crate::escape;
use crate::page::Page;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use tera::{Context, Tera, Value};

const TROFF_TEMPLATE: &str = include_str!("../templates/troff.tera");
const MDOC_TEMPLATE: &str = include_str!("../templates/mdoc.tera");
const MARKDOWN_TEMPLATE: &str = include_str!("../templates/markdown.tera");

/// A template function: receives the piped value and named arguments.
pub type TemplateFn =
    Arc<dyn Fn(&Value, &HashMap<String, Value>) -> tera::Result<Value> + Send + Sync>;

/// Trait for rendering a page into a specific output format.
pub trait Renderer: Send + Sync {
    fn render(&self, page: &Page) -> Result<String>;
}

/// A compiled Tera template with the filter table it was compiled against.
pub struct TeraRenderer {
    name: String,
    tera: Tera,
}

impl TeraRenderer {
    fn compile(name: &str, source: &str, functions: &BTreeMap<String, TemplateFn>) -> tera::Result<Self> {
        let mut tera = Tera::default();
        tera.autoescape_on(Vec::new());
        for (fn_name, f) in functions {
            let f = Arc::clone(f);
            tera.register_filter(fn_name, move |value: &Value, args: &HashMap<String, Value>| {
                f(value, args)
            });
        }
        tera.add_raw_template(name, source)?;
        Ok(TeraRenderer {
            name: name.to_string(),
            tera,
        })
    }
}

impl Renderer for TeraRenderer {
    fn render(&self, page: &Page) -> Result<String> {
        let render_err = |source| Error::Render {
            template: self.name.clone(),
            source,
        };
        let context = Context::from_serialize(page).map_err(render_err)?;
        self.tera.render(&self.name, &context).map_err(render_err)
    }
}

/// Everything needed to turn a command into a named file.
pub struct TemplateEntry {
    /// Replaces spaces of the command path in file names
    pub separator: String,
    /// Fixed file extension; `None` means "use the manual section"
    pub extension: Option<String>,
    pub renderer: Box<dyn Renderer>,
}

impl std::fmt::Debug for TemplateEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TemplateEntry")
            .field("separator", &self.separator)
            .field("extension", &self.extension)
            .finish_non_exhaustive()
    }
}

/// Named templates and the filters available when compiling new ones.
///
/// Populate it up front; generation only needs `&Registry`.
pub struct Registry {
    templates: HashMap<String, TemplateEntry>,
    functions: BTreeMap<String, TemplateFn>,
}

impl Default for Registry {
    /// Built-in filters plus the `troff`, `mdoc` and `markdown` templates.
    fn default() -> Self {
        let mut registry = Registry::new();
        registry.register("troff", "-", None, TROFF_TEMPLATE);
        registry.register("mdoc", "-", None, MDOC_TEMPLATE);
        registry.register("markdown", "_", Some("md"), MARKDOWN_TEMPLATE);
        registry
    }
}

impl Registry {
    /// Built-in filters, no templates.
    pub fn new() -> Self {
        let mut registry = Registry {
            templates: HashMap::new(),
            functions: BTreeMap::new(),
        };
        registry.add_function("upper", string_filter(|s| s.to_uppercase()));
        registry.add_function("backslashify", string_filter(escape::escape_control_chars));
        registry.add_function("simple_to_troff", string_filter(escape::simple_to_troff));
        registry.add_function("simple_to_mdoc", string_filter(escape::simple_to_mdoc));
        registry.add_function("dashify", string_filter(escape::dashify));
        registry.add_function("underscoreify", string_filter(escape::underscoreify));
        registry.add_function("trim_right_space", string_filter(escape::trim_right_space));
        registry.add_function("rpad", rpad_filter);
        registry.add_function("makeline", makeline_filter);
        registry
    }

    /// Compile `source` and store it under `name`, replacing any earlier entry.
    ///
    /// `extension` of `None` makes generated files use the manual section.
    ///
    /// # Panics
    ///
    /// Panics if `source` is not a valid template. Templates are registered
    /// at startup, so a broken one is a bug in the caller.
    pub fn register(&mut self, name: &str, separator: &str, extension: Option<&str>, source: &str) {
        let renderer = TeraRenderer::compile(name, source, &self.functions)
            .unwrap_or_else(|e| panic!("invalid template {}: {}", name, describe(&e)));
        self.register_renderer(name, separator, extension, Box::new(renderer));
    }

    /// Store a custom rendering strategy under `name`.
    pub fn register_renderer(
        &mut self,
        name: &str,
        separator: &str,
        extension: Option<&str>,
        renderer: Box<dyn Renderer>,
    ) {
        log::debug!("registering template {}", name);
        self.templates.insert(
            name.to_string(),
            TemplateEntry {
                separator: separator.to_string(),
                extension: extension.map(str::to_string),
                renderer,
            },
        );
    }

    pub fn lookup(&self, name: &str) -> Option<&TemplateEntry> {
        self.templates.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.templates.contains_key(name)
    }

    /// Registered template names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.templates.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Make a filter available to templates registered after this call.
    pub fn add_function<F>(&mut self, name: &str, f: F)
    where
        F: Fn(&Value, &HashMap<String, Value>) -> tera::Result<Value> + Send + Sync + 'static,
    {
        self.functions.insert(name.to_string(), Arc::new(f));
    }

    pub fn add_functions<I>(&mut self, functions: I)
    where
        I: IntoIterator<Item = (String, TemplateFn)>,
    {
        self.functions.extend(functions);
    }
}

/// Render the full error chain; Tera keeps the useful part in `source()`.
fn describe(err: &dyn std::error::Error) -> String {
    let mut msg = err.to_string();
    let mut source = err.source();
    while let Some(inner) = source {
        msg.push_str(": ");
        msg.push_str(&inner.to_string());
        source = inner.source();
    }
    msg
}

// -- Built-in filters ---------------------------------------------------------

fn as_str<'v>(value: &'v Value, filter: &str) -> tera::Result<&'v str> {
    value
        .as_str()
        .ok_or_else(|| tera::Error::msg(format!("filter `{}` expects a string, got {}", filter, value)))
}

/// Wrap a plain string transform as a filter.
fn string_filter<F>(f: F) -> impl Fn(&Value, &HashMap<String, Value>) -> tera::Result<Value> + Send + Sync + 'static
where
    F: Fn(&str) -> String + Send + Sync + 'static,
{
    move |value: &Value, _args: &HashMap<String, Value>| {
        let s = as_str(value, "string")?;
        Ok(Value::String(f(s)))
    }
}

/// `{{ name | rpad(width=20) }}`
fn rpad_filter(value: &Value, args: &HashMap<String, Value>) -> tera::Result<Value> {
    let s = as_str(value, "rpad")?;
    let width = args
        .get("width")
        .and_then(Value::as_u64)
        .ok_or_else(|| tera::Error::msg("filter `rpad` expects a `width` argument"))?;
    Ok(Value::String(escape::rpad(s, width as usize)))
}

/// `{{ title | makeline(char="=") }}`
fn makeline_filter(value: &Value, args: &HashMap<String, Value>) -> tera::Result<Value> {
    let s = as_str(value, "makeline")?;
    let fill = args
        .get("char")
        .and_then(Value::as_str)
        .and_then(|c| c.chars().next())
        .unwrap_or('-');
    Ok(Value::String(escape::makeline(s, fill)))
}
