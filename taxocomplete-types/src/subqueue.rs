//! Composite names of per-term subqueues.
//!
//! A taxonomy queue keeps one subqueue per term, named `{queue}_{term_id}`.
//! Views arguments and admin listings derive the name from the current term.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::{Error, TermId};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SubqueueName {
    queue: String,
    term: TermId,
}

impl SubqueueName {
    pub fn new(queue: impl Into<String>, term: TermId) -> Self {
        Self {
            queue: queue.into(),
            term,
        }
    }

    pub fn queue(&self) -> &str {
        &self.queue
    }

    pub fn term(&self) -> TermId {
        self.term
    }

    /// Splits a subqueue name at its last underscore. Queue IDs may contain
    /// underscores; term IDs never do.
    pub fn parse(s: &str) -> Result<Self, Error> {
        let (queue, term) = s
            .rsplit_once('_')
            .ok_or_else(|| Error::InvalidSubqueueName(s.to_string()))?;
        if queue.is_empty() {
            return Err(Error::InvalidSubqueueName(s.to_string()));
        }
        let term = TermId::parse(term).map_err(|_| Error::InvalidSubqueueName(s.to_string()))?;
        Ok(Self::new(queue, term))
    }
}

impl fmt::Display for SubqueueName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}", self.queue, self.term)
    }
}

impl FromStr for SubqueueName {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
