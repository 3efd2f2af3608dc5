use crate::core::class::PresenterClass;
use crate::core::presenter::Presenter;
use crate::domain::ports::SubjectRef;
use std::sync::Arc;

impl PresenterClass {
    /// One presenter per item, each sharing the same trailing subjects.
    ///
    /// ```
    /// use simple_presenter::{ExposeOptions, PresenterClass, SubjectRef};
    /// use serde_json::json;
    /// use std::sync::Arc;
    ///
    /// let mut users = PresenterClass::new("UserPresenter");
    /// users.expose(&["name"], ExposeOptions::default());
    /// let users = users.freeze();
    ///
    /// let people: Vec<SubjectRef> = vec![Arc::new(json!({"name": "Ann"})), Arc::new(json!({"name": "Bob"}))];
    /// let presenters = users.map(people, &[]);
    /// assert_eq!(presenters[1].call("name").as_str(), Some("Bob"));
    /// ```
    pub fn map<I>(self: &Arc<Self>, collection: I, subjects: &[Option<SubjectRef>]) -> Vec<Presenter>
    where
        I: IntoIterator<Item = SubjectRef>,
    {
        let presenters: Vec<Presenter> = collection
            .into_iter()
            .map(|item| {
                let mut bound = Vec::with_capacity(subjects.len() + 1);
                bound.push(Some(item));
                bound.extend(subjects.iter().cloned());
                self.present(bound)
            })
            .collect();
        tracing::debug!("{}: mapped {} subjects", self.name(), presenters.len());
        presenters
    }
}
