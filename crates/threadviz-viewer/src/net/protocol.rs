use threadviz_core::ThreadPayload;

/// Outcome of one thread request, tagged with the id it was issued under.
#[derive(Debug, Clone, PartialEq)]
pub struct ThreadEvent {
    pub request: u64,
    pub kind: ThreadEventKind,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ThreadEventKind {
    Loaded(Box<ThreadPayload>),
    Failed(String),
    Cancelled,
}

impl ThreadEvent {
    pub fn loaded(request: u64, payload: ThreadPayload) -> Self {
        Self {
            request,
            kind: ThreadEventKind::Loaded(Box::new(payload)),
        }
    }

    pub fn failed(request: u64, message: String) -> Self {
        Self {
            request,
            kind: ThreadEventKind::Failed(message),
        }
    }

    pub fn cancelled(request: u64) -> Self {
        Self {
            request,
            kind: ThreadEventKind::Cancelled,
        }
    }
}
