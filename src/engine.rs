use crate::{
    compile::{Parser, Template, DEFAULT_MAX_DEPTH},
    render::{ensure_data, Renderer},
    Error, Properties, Sources,
};
use std::collections::HashMap;
use tracing::debug;

/// Facilitates compiling and rendering templates, and provides storage
/// for named templates.
#[derive(Debug, Clone)]
pub struct Engine {
    /// Templates that this Engine is aware of.
    templates: HashMap<String, Template>,
    /// Maximum number of directives that may enclose each other.
    max_depth: usize,
}

impl Default for Engine {
    fn default() -> Self {
        Self {
            templates: HashMap::new(),
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl Engine {
    /// Set the maximum number of directives that may enclose each other.
    ///
    /// Returns the [`Engine`], so additional methods may be chained.
    ///
    /// # Examples
    ///
    /// ```
    /// use brace::Engine;
    ///
    /// let engine = Engine::default().with_max_depth(1);
    /// assert!(engine.compile("{!a}{!b}(b){!b}{!a}").is_err());
    /// ```
    #[inline]
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.set_max_depth(max_depth);
        self
    }

    /// Set the maximum number of directives that may enclose each other.
    #[inline]
    pub fn set_max_depth(&mut self, max_depth: usize) {
        self.max_depth = max_depth;
    }

    #[inline]
    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Compile a new [`Template`].
    ///
    /// # Errors
    ///
    /// Returns an [`Error`] when compilation fails, which means the source
    /// is structurally malformed.
    ///
    /// # Examples
    ///
    /// ```
    /// use brace::Engine;
    ///
    /// let engine = Engine::default();
    /// let template = engine.compile("{!name}hello, (name)!{!name}");
    /// assert!(template.is_ok());
    /// ```
    #[inline]
    pub fn compile(&self, text: &str) -> Result<Template, Error> {
        Ok(Parser::new(text).with_max_depth(self.max_depth).compile()?)
    }

    /// Render a [`Template`] with the given data.
    ///
    /// # Errors
    ///
    /// Returns an [`Error`] if the data is null.
    ///
    /// # Examples
    ///
    /// ```
    /// use brace::{Engine, Store};
    ///
    /// let engine = Engine::default();
    /// let template = engine.compile("hello, (name)!").unwrap();
    /// let result = engine.render(&template, &Store::new().with_must("name", "taylor"));
    ///
    /// assert_eq!(result.unwrap(), "hello, taylor!")
    /// ```
    #[inline]
    pub fn render(&self, template: &Template, data: &dyn Properties) -> Result<String, Error> {
        Renderer::new(template, data).render()
    }

    /// Compile and render the given text.
    ///
    /// The data is checked before the text is compiled, so null data is
    /// reported even when the text is malformed.
    ///
    /// # Errors
    ///
    /// Returns an [`Error`] if the data is null or compilation fails.
    pub fn render_text(&self, data: &dyn Properties, text: &str) -> Result<String, Error> {
        ensure_data(data)?;
        let template = self.compile(text)?;

        self.render(&template, data)
    }

    /// Load, compile and render a template from the given [`Sources`].
    ///
    /// # Errors
    ///
    /// Returns an [`Error`] if the data is null, the sources cannot be
    /// loaded, or compilation fails.
    ///
    /// # Examples
    ///
    /// ```
    /// use brace::{Engine, Sources};
    /// use serde_json::json;
    ///
    /// let result = Engine::default().render_sources(
    ///     &json!({"tags": ["a", "b"]}),
    ///     Sources::new().with_text("tags: (#tags)"),
    /// );
    ///
    /// assert_eq!(result.unwrap(), "tags: a, b");
    /// ```
    pub fn render_sources(&self, data: &dyn Properties, sources: Sources) -> Result<String, Error> {
        ensure_data(data)?;
        let text = sources.load()?;

        self.render_text(data, &text)
    }

    /// Render the named [`Template`] with the given data.
    ///
    /// # Errors
    ///
    /// Returns an [`Error`] if no `Template` has the given name, or the data
    /// is null.
    pub fn render_named(&self, name: &str, data: &dyn Properties) -> Result<String, Error> {
        let template = self.get_template(name).ok_or_else(|| {
            Error::usage(format!(
                "template with name `{name}` not found in engine, \
                add it with `.add_template`"
            ))
        })?;

        self.render(template, data)
    }

    /// Compile and store a new [`Template`] with the given name.
    ///
    /// # Errors
    ///
    /// Returns an [`Error`] when a `Template` with the given name already exists,
    /// or when compilation fails.
    ///
    /// # Examples
    ///
    /// ```
    /// use brace::Engine;
    ///
    /// let mut engine = Engine::default();
    /// let result = engine.add_template("template_name", "hello, (name)!");
    /// assert!(result.is_ok());
    ///
    /// let second = engine.add_template("template_name", "hello again");
    /// assert!(second.is_err());
    /// ```
    pub fn add_template(&mut self, name: &str, text: &str) -> Result<(), Error> {
        if self.templates.contains_key(name) {
            return Err(Error::usage(format!(
                "template with name `{name}` already exists in engine, \
                overwrite it with `.add_template_must`"
            )));
        }

        self.add_template_must(name, text)
    }

    /// Compile and store a new [`Template`] with the given name.
    ///
    /// If a `Template` with the given name already exists in the [`Engine`],
    /// it is overwritten.
    ///
    /// # Errors
    ///
    /// Returns an [`Error`] when compilation fails.
    ///
    /// # Examples
    ///
    /// ```
    /// use brace::Engine;
    ///
    /// let mut engine = Engine::default();
    /// engine.add_template_must("template_name", "hello, (name)!").unwrap();
    /// engine.add_template_must("template_name", "goodbye, (name)!").unwrap();
    /// ```
    pub fn add_template_must(&mut self, name: &str, text: &str) -> Result<(), Error> {
        let mut template = Parser::new(text)
            .with_max_depth(self.max_depth)
            .compile()
            .map_err(|error| error.with_name(name))?;
        template.name = Some(name.to_string());

        debug!(name, "stored template");
        self.templates.insert(name.to_string(), template);
        Ok(())
    }

    /// Return the named [`Template`].
    ///
    /// # Examples
    ///
    /// ```
    /// use brace::Engine;
    ///
    /// let mut engine = Engine::default();
    /// engine.add_template_must("template_name", "hello, (name)!").unwrap();
    ///
    /// let template = engine.get_template("template_name");
    /// assert!(template.is_some());
    /// ```
    #[inline]
    pub fn get_template(&self, name: &str) -> Option<&Template> {
        self.templates.get(name)
    }
}

#[cfg(test)]
mod tests {
    use super::Engine;
    use crate::{Error, Sources};
    use serde_json::json;

    #[test]
    fn test_render_named() {
        let mut engine = Engine::default();
        engine
            .add_template("member", "{!summary}(name): (summary){!summary}")
            .unwrap();

        assert_eq!(
            engine
                .render_named("member", &json!({"name": "Parse", "summary": "Reads."}))
                .unwrap(),
            "Parse: Reads."
        );
        assert_eq!(engine.get_template("member").unwrap().name.as_deref(), Some("member"));
        assert!(engine.render_named("type", &json!({})).unwrap_err().is_usage());
    }

    #[test]
    fn test_add_template_duplicate() {
        let mut engine = Engine::default();
        engine.add_template("a", "one").unwrap();

        assert!(engine.add_template("a", "two").unwrap_err().is_usage());

        engine.add_template_must("a", "two").unwrap();
        assert_eq!(engine.render_named("a", &json!({})).unwrap(), "two");
    }

    #[test]
    fn test_add_template_names_error() {
        let mut engine = Engine::default();
        let error = engine.add_template("broken", "line\n{!a}").unwrap_err();
        let syntax = error.as_syntax().unwrap();

        assert_eq!(syntax.name(), Some("broken"));
        assert_eq!((syntax.line(), syntax.column()), (2, 1));
        assert!(engine.get_template("broken").is_none());
    }

    #[test]
    fn test_max_depth() {
        let engine = Engine::default().with_max_depth(2);
        assert_eq!(engine.max_depth(), 2);

        assert!(engine.compile("{*a}{*b}(c){*b}{*a}").is_ok());
        assert!(matches!(
            engine.compile("{*a}{*b}{!c}(c){!c}{*b}{*a}"),
            Err(Error::Syntax(_))
        ));
    }

    #[test]
    fn test_render_text_checks_data_first() {
        let engine = Engine::default();

        assert!(engine.render_text(&json!(null), "{").unwrap_err().is_usage());
        assert!(engine.render_text(&json!({}), "{").unwrap_err().as_syntax().is_some());
    }

    #[test]
    fn test_render_sources() {
        let engine = Engine::default();
        let data = json!({"items": [{"name": "A"}, {"name": "B"}]});

        assert_eq!(
            engine
                .render_sources(&data, Sources::new().with_text("{*items}(name){*items}"))
                .unwrap(),
            "A\nB"
        );
        assert!(engine
            .render_sources(&data, Sources::new())
            .unwrap_err()
            .is_usage());
    }
}
