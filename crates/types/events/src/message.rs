use chrono::{DateTime, Utc};
use std::ops::Deref;

/// Envelope for everything that travels over a broadcast channel
#[derive(Clone, Debug)]
pub struct Message<T> {
    pub inner: T,
    pub source: Option<String>,
    pub time: DateTime<Utc>,
}

impl<T> Message<T> {
    pub fn new(inner: T) -> Self {
        Self { inner, source: None, time: Utc::now() }
    }

    pub fn new_with_source(inner: T, source: String) -> Self {
        Self { inner, source: Some(source), time: Utc::now() }
    }

    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }

    pub fn inner(&self) -> &T {
        &self.inner
    }

    pub fn into_inner(self) -> T {
        self.inner
    }
}

impl<T> Deref for Message<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}
