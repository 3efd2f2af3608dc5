use crate::core::class::PresenterClass;
use crate::domain::model::{AttrValue, ExposureSpec, SubjectRole};
use crate::domain::ports::{Block, Helpers, SubjectRef};
use crate::utils::error::{PresenterError, Result};
use serde_json::{Map, Value};
use std::fmt;
use std::sync::Arc;

/// A view over one set of subjects, shaped by a `PresenterClass`.
#[derive(Clone)]
pub struct Presenter {
    class: Arc<PresenterClass>,
    subjects: Vec<(SubjectRole, Option<SubjectRef>)>,
    helpers: Option<Arc<dyn Helpers>>,
}

impl Presenter {
    /// Binds subjects to the declared roles by position.
    ///
    /// Extra values are dropped; roles without a value are bound as absent.
    pub fn new(class: Arc<PresenterClass>, subjects: Vec<Option<SubjectRef>>) -> Self {
        let mut values = subjects.into_iter();
        let subjects = class
            .subject_roles()
            .iter()
            .map(|role| (role.clone(), values.next().flatten()))
            .collect();
        Self {
            class,
            subjects,
            helpers: None,
        }
    }

    pub fn with_helpers(mut self, helpers: Arc<dyn Helpers>) -> Self {
        self.helpers = Some(helpers);
        self
    }

    pub fn class(&self) -> &PresenterClass {
        &self.class
    }

    pub fn class_name(&self) -> &str {
        self.class.name()
    }

    /// The subject bound under `role`, for methods a host adds on top of a presenter.
    pub fn subject(&self, role: &str) -> Option<&SubjectRef> {
        self.subjects
            .iter()
            .find(|(bound, _)| bound == role)
            .and_then(|(_, subject)| subject.as_ref())
    }

    pub fn responds_to(&self, exposed_name: &str) -> bool {
        self.class.exposure(exposed_name).is_some()
    }

    /// Reads an exposed attribute; an unknown name is an error.
    pub fn try_call(&self, exposed_name: &str, block: Option<Block<'_>>) -> Result<AttrValue> {
        let spec = self
            .class
            .exposure(exposed_name)
            .ok_or_else(|| PresenterError::UnknownAttribute {
                presenter: self.class.name().to_string(),
                name: exposed_name.to_string(),
            })?;
        Ok(self.proxy(spec, block))
    }

    pub fn call(&self, exposed_name: &str) -> AttrValue {
        self.call_or_absent(exposed_name, None)
    }

    pub fn call_with<F: FnMut(&AttrValue)>(&self, exposed_name: &str, mut block: F) -> AttrValue {
        let block: Block<'_> = &mut block;
        self.call_or_absent(exposed_name, Some(block))
    }

    fn call_or_absent(&self, exposed_name: &str, block: Option<Block<'_>>) -> AttrValue {
        match self.try_call(exposed_name, block) {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!("{}", e);
                AttrValue::absent()
            }
        }
    }

    /// Every exposed attribute, keyed by its exposed name.
    pub fn to_json(&self) -> Map<String, Value> {
        self.class
            .attributes()
            .values()
            .map(|spec| (spec.exposed_name.clone(), self.proxy(spec, None).to_json()))
            .collect()
    }

    fn proxy(&self, spec: &ExposureSpec, block: Option<Block<'_>>) -> AttrValue {
        let role = spec
            .source_role
            .as_deref()
            .unwrap_or_else(|| self.class.default_role());

        let Some(candidate) = self.resolve(role) else {
            tracing::trace!("{}: no `{}` subject for `{}`", self.class.name(), role, spec.exposed_name);
            return AttrValue::absent();
        };

        if !candidate.responds_to(&spec.source_attribute) {
            tracing::trace!(
                "{}: `{}` does not respond to `{}`",
                self.class.name(),
                role,
                spec.source_attribute
            );
            return AttrValue::absent();
        }

        candidate.send(&spec.source_attribute, block)
    }

    /// A bound subject wins. Otherwise a role the class never declared is
    /// read as an attribute of the default subject.
    fn resolve(&self, role: &str) -> Option<SubjectRef> {
        if let Some(subject) = self.subject(role) {
            return Some(Arc::clone(subject));
        }
        if self.class.declares(role) {
            return None;
        }

        let default = self.subject(self.class.default_role())?;
        if !default.responds_to(role) {
            return None;
        }
        tracing::trace!("{}: `{}` resolved through the default subject", self.class.name(), role);
        default.send(role, None).into_subject()
    }

    pub fn translate(&self, key: &str, options: &Map<String, Value>) -> Option<String> {
        self.helpers.as_ref()?.translate(key, options)
    }

    pub fn t(&self, key: &str) -> Option<String> {
        self.translate(key, &Map::new())
    }

    pub fn localize(&self, value: &Value, options: &Map<String, Value>) -> Option<String> {
        self.helpers.as_ref()?.localize(value, options)
    }

    pub fn l(&self, value: &Value) -> Option<String> {
        self.localize(value, &Map::new())
    }

    /// Builds a URL through the host, merged over `default_url_options`.
    pub fn url_for(&self, route: &str, params: &Map<String, Value>) -> Option<String> {
        let helpers = self.helpers.as_ref()?;
        let mut merged = self.default_url_options();
        merged.extend(params.iter().map(|(k, v)| (k.clone(), v.clone())));
        helpers.url_for(route, &merged)
    }

    pub fn r(&self, route: &str) -> Option<String> {
        self.url_for(route, &Map::new())
    }

    pub fn helper(&self, name: &str, args: &[Value]) -> Option<Value> {
        self.helpers.as_ref()?.helper(name, args)
    }

    pub fn h(&self, name: &str, args: &[Value]) -> Option<Value> {
        self.helper(name, args)
    }

    /// Class options first, then the host's, then nothing.
    pub fn default_url_options(&self) -> Map<String, Value> {
        if let Some(options) = self.class.default_url_options() {
            return options.clone();
        }
        self.helpers
            .as_ref()
            .and_then(|helpers| helpers.default_url_options())
            .unwrap_or_default()
    }
}

impl fmt::Debug for Presenter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Presenter")
            .field("class", &self.class.name())
            .field("subjects", &self.subjects)
            .field("helpers", &self.helpers.is_some())
            .finish()
    }
}

impl PresenterClass {
    pub fn present(self: &Arc<Self>, subjects: Vec<Option<SubjectRef>>) -> Presenter {
        Presenter::new(Arc::clone(self), subjects)
    }
}
