//! Scripted operator and fake host shared by the session tests.

use repo_audit::{HostError, IssueRef, RepoRecord, RepositoryHost, Shell, ShellError, TaskHandle};
use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

/// One scripted operator reply, consumed in order.
#[derive(Debug)]
pub enum Reply {
    Confirm(bool),
    Select(usize),
    Input(String),
    /// The operator presses Ctrl-C at this prompt.
    Interrupt,
}

/// Shell whose operator answers from a fixed script. Panics when the
/// script and the prompts the code actually issues disagree.
#[derive(Default)]
pub struct ScriptedShell {
    replies: Mutex<VecDeque<Reply>>,
    prompts: Mutex<Vec<String>>,
    failures: Mutex<Vec<String>>,
}

impl ScriptedShell {
    pub fn new(replies: Vec<Reply>) -> Self {
        Self {
            replies: Mutex::new(replies.into()),
            prompts: Mutex::new(Vec::new()),
            failures: Mutex::new(Vec::new()),
        }
    }

    /// Every confirm/select/input prompt issued, in order.
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }

    /// Every failure message shown to the operator.
    pub fn failures(&self) -> Vec<String> {
        self.failures.lock().unwrap().clone()
    }

    fn next(&self, prompt: &str) -> Result<Reply, ShellError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        let reply = self
            .replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| panic!("no scripted reply left for prompt '{prompt}'"));
        match reply {
            Reply::Interrupt => Err(ShellError::Interrupted),
            other => Ok(other),
        }
    }
}

impl Shell for ScriptedShell {
    fn frame(&self, _title: &str) {}

    fn note(&self, _message: &str) {}

    fn success(&self, _message: &str) {}

    fn failure(&self, message: &str) {
        self.failures.lock().unwrap().push(message.to_string());
    }

    fn confirm(&self, prompt: &str) -> Result<bool, ShellError> {
        match self.next(prompt)? {
            Reply::Confirm(answer) => Ok(answer),
            other => panic!("expected a confirm reply for '{prompt}', got {other:?}"),
        }
    }

    fn select(&self, prompt: &str, labels: &[&str]) -> Result<usize, ShellError> {
        match self.next(prompt)? {
            Reply::Select(index) => {
                assert!(index < labels.len(), "scripted index out of range");
                Ok(index)
            }
            other => panic!("expected a select reply for '{prompt}', got {other:?}"),
        }
    }

    fn input(&self, prompt: &str) -> Result<String, ShellError> {
        match self.next(prompt)? {
            Reply::Input(text) => Ok(text),
            other => panic!("expected an input reply for '{prompt}', got {other:?}"),
        }
    }

    fn task(&self, _label: &str) -> Box<dyn TaskHandle + Send> {
        Box::new(NoopTask)
    }
}

struct NoopTask;

impl TaskHandle for NoopTask {
    fn complete(self: Box<Self>) {}

    fn fail(self: Box<Self>, _message: &str) {}
}

/// In-memory host recording every mutation it is asked to perform.
#[derive(Default)]
pub struct FakeHost {
    pub repos: Vec<RepoRecord>,
    issues: HashMap<String, Vec<IssueRef>>,
    /// Error message every archive call fails with.
    archive_failure: Option<String>,
    /// Error message every delete call fails with.
    delete_failure: Option<String>,
    list_calls: Mutex<usize>,
    archived: Mutex<Vec<String>>,
    deleted: Mutex<Vec<String>>,
    closed: Mutex<Vec<(String, u64)>>,
}

impl FakeHost {
    pub fn new(repos: Vec<RepoRecord>) -> Self {
        Self {
            repos,
            ..Self::default()
        }
    }

    pub fn with_issues(mut self, owner: &str, name: &str, issues: Vec<IssueRef>) -> Self {
        self.issues.insert(format!("{owner}/{name}"), issues);
        self
    }

    pub fn with_archive_failure(mut self, message: &str) -> Self {
        self.archive_failure = Some(message.to_string());
        self
    }

    pub fn with_delete_failure(mut self, message: &str) -> Self {
        self.delete_failure = Some(message.to_string());
        self
    }

    pub fn list_calls(&self) -> usize {
        *self.list_calls.lock().unwrap()
    }

    pub fn archived(&self) -> Vec<String> {
        self.archived.lock().unwrap().clone()
    }

    pub fn deleted(&self) -> Vec<String> {
        self.deleted.lock().unwrap().clone()
    }

    pub fn closed(&self) -> Vec<(String, u64)> {
        self.closed.lock().unwrap().clone()
    }
}

impl RepositoryHost for FakeHost {
    async fn list_repositories(&self) -> Result<Vec<RepoRecord>, HostError> {
        *self.list_calls.lock().unwrap() += 1;
        Ok(self.repos.clone())
    }

    async fn archive_repository(&self, owner: &str, name: &str) -> Result<(), HostError> {
        if let Some(message) = &self.archive_failure {
            return Err(HostError::remote(message.clone()));
        }
        self.archived.lock().unwrap().push(format!("{owner}/{name}"));
        Ok(())
    }

    async fn delete_repository(&self, owner: &str, name: &str) -> Result<(), HostError> {
        if let Some(message) = &self.delete_failure {
            return Err(HostError::remote(message.clone()));
        }
        self.deleted.lock().unwrap().push(format!("{owner}/{name}"));
        Ok(())
    }

    async fn list_open_issues(
        &self,
        owner: &str,
        name: &str,
    ) -> Result<Vec<IssueRef>, HostError> {
        Ok(self
            .issues
            .get(&format!("{owner}/{name}"))
            .cloned()
            .unwrap_or_default())
    }

    async fn close_issue(&self, owner: &str, name: &str, number: u64) -> Result<(), HostError> {
        self.closed
            .lock()
            .unwrap()
            .push((format!("{owner}/{name}"), number));
        Ok(())
    }
}

/// A plain unarchived repository record.
pub fn record(owner: &str, id: u64, name: &str) -> RepoRecord {
    RepoRecord {
        id,
        owner: owner.to_string(),
        name: name.to_string(),
        fork: false,
        archived: false,
        private: false,
        url: format!("https://github.com/{owner}/{name}"),
        stars: 0,
        subscribers: 0,
        open_issues: 0,
        last_push: None,
        last_update: None,
    }
}

/// A record whose snapshot already carries the archived flag.
pub fn archived_record(owner: &str, id: u64, name: &str) -> RepoRecord {
    RepoRecord {
        archived: true,
        ..record(owner, id, name)
    }
}

pub fn issue(number: u64, title: &str) -> IssueRef {
    IssueRef {
        number,
        title: title.to_string(),
    }
}
