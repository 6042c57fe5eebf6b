use log::trace;

/// Recognizes edits the surface reports more than once. Commit ids increase
/// with every physical edit, so an id that does not exceed the last accepted
/// one is a repeat. Edits without an id are always accepted.
#[derive(Debug, Clone, Default)]
pub struct CommitFilter {
    last_accepted: Option<u64>,
}

impl CommitFilter {
    #[must_use]
    pub fn new() -> Self { Self::default() }

    /// Whether an edit carrying `commit_id` should be processed. Accepting an
    /// id remembers it.
    pub fn accept(&mut self, commit_id: Option<u64>) -> bool {
        let Some(commit_id) = commit_id else {
            return true;
        };

        if self.last_accepted.is_some_and(|last| commit_id <= last) {
            trace!("Dropping repeated commit {commit_id}");
            return false;
        }

        self.last_accepted = Some(commit_id);
        true
    }
}
