use crate::domain::model::{ExposeOptions, ExposureSpec, SubjectRole};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::sync::Arc;

pub const DEFAULT_ROLE: &str = "subject";

/// Declarative description of one presenter type.
///
/// Built with `&mut self` while the type is being defined, then frozen into
/// an `Arc` and shared by every instance. A frozen descriptor is never
/// mutated again, so it can be read from any thread.
///
/// ```
/// use simple_presenter::{ExposeOptions, PresenterClass};
///
/// let mut comments = PresenterClass::new("CommentPresenter");
/// comments.subjects(&["comment", "post"]);
/// comments
///     .expose(&["body"], ExposeOptions::default())
///     .expose(&["name"], ExposeOptions::with("user"))
///     .expose(&["title"], ExposeOptions::with("post"));
///
/// assert!(comments.attributes().contains_key("user_name"));
/// assert_eq!(comments.default_role(), "comment");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct PresenterClass {
    name: String,
    parent: Option<String>,
    subjects: Vec<SubjectRole>,
    attributes: BTreeMap<String, ExposureSpec>,
    default_url_options: Option<Map<String, Value>>,
}

impl PresenterClass {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            parent: None,
            subjects: vec![DEFAULT_ROLE.to_string()],
            attributes: BTreeMap::new(),
            default_url_options: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn parent(&self) -> Option<&str> {
        self.parent.as_deref()
    }

    /// Replaces the subject roles. An empty list only queries the current roles.
    pub fn subjects<S: AsRef<str>>(&mut self, names: &[S]) -> &[SubjectRole] {
        if !names.is_empty() {
            let mut roles: Vec<SubjectRole> = Vec::with_capacity(names.len());
            for name in names {
                let name = name.as_ref();
                if roles.iter().any(|role| role == name) {
                    tracing::debug!("{}: ignoring repeated subject role `{}`", self.name, name);
                    continue;
                }
                roles.push(name.to_string());
            }
            tracing::trace!("{}: subjects {:?}", self.name, roles);
            self.subjects = roles;
        }
        &self.subjects
    }

    pub fn subject(&mut self, name: &str) -> &[SubjectRole] {
        self.subjects(&[name])
    }

    pub fn subject_roles(&self) -> &[SubjectRole] {
        &self.subjects
    }

    pub fn default_role(&self) -> &str {
        self.subjects.first().map(String::as_str).unwrap_or(DEFAULT_ROLE)
    }

    pub fn declares(&self, role: &str) -> bool {
        self.subjects.iter().any(|declared| declared == role)
    }

    /// Exposes each attribute, read from `options.with` when given.
    ///
    /// Exposing a name twice keeps the last declaration.
    pub fn expose<S: AsRef<str>>(&mut self, attributes: &[S], options: ExposeOptions) -> &mut Self {
        for attribute in attributes {
            let spec = ExposureSpec::new(attribute.as_ref(), options.with.clone());
            tracing::trace!(
                "{}: expose `{}` as `{}`",
                self.name,
                spec.source_attribute,
                spec.exposed_name
            );
            if let Some(previous) = self.attributes.insert(spec.exposed_name.clone(), spec) {
                tracing::debug!("{}: redefined `{}`", self.name, previous.exposed_name);
            }
        }
        self
    }

    pub fn attributes(&self) -> &BTreeMap<String, ExposureSpec> {
        &self.attributes
    }

    pub fn exposure(&self, exposed_name: &str) -> Option<&ExposureSpec> {
        self.attributes.get(exposed_name)
    }

    /// Derives a child type from a snapshot of the current roles and exposures.
    ///
    /// Later declarations on either side stay local to that side.
    pub fn subclass(&self, name: impl Into<String>) -> PresenterClass {
        let child = PresenterClass {
            name: name.into(),
            parent: Some(self.name.clone()),
            subjects: self.subjects.clone(),
            attributes: self.attributes.clone(),
            default_url_options: self.default_url_options.clone(),
        };
        tracing::debug!(
            "{} < {}: inherited {} subjects, {} attributes",
            child.name,
            self.name,
            child.subjects.len(),
            child.attributes.len()
        );
        child
    }

    pub fn set_default_url_options(&mut self, options: Map<String, Value>) -> &mut Self {
        self.default_url_options = Some(options);
        self
    }

    pub fn default_url_options(&self) -> Option<&Map<String, Value>> {
        self.default_url_options.as_ref()
    }

    /// Ends the definition phase.
    pub fn freeze(self) -> Arc<PresenterClass> {
        Arc::new(self)
    }
}
