use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, RepotallyError>;

#[derive(Error, Debug)]
pub enum RepotallyError {
    #[error("Remote listing failed: HTTP {status}: {body}")]
    RemoteFetch { status: u16, body: String },
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Mirror for {name} not found at {path}")]
    MirrorNotFound { name: String, path: PathBuf },
    #[error("Git error: {0}")]
    Git(#[from] Box<gix::open::Error>),
    #[error("Clone error: {0}")]
    Clone(#[from] Box<gix::clone::Error>),
    #[error("Clone fetch error: {0}")]
    CloneFetch(#[from] Box<gix::clone::fetch::Error>),
    #[error("Object find error: {0}")]
    ObjectFind(#[from] Box<gix::object::find::existing::Error>),
    #[error("Commit error: {0}")]
    Commit(#[from] Box<gix::object::commit::Error>),
    #[error("Reference find error: {0}")]
    RefFind(#[from] Box<gix::reference::find::existing::Error>),
    #[error("Head peel error: {0}")]
    HeadPeel(#[from] Box<gix::head::peel::to_commit::Error>),
    #[error("Object find with conversion error: {0}")]
    ObjectFindConv(#[from] Box<gix::object::find::existing::with_conversion::Error>),
    #[error("Object decode error: {0}")]
    ObjectDecode(#[from] Box<gix::objs::decode::Error>),
    #[error("Diff tree to tree error: {0}")]
    DiffTreeToTree(#[from] Box<gix::repository::diff_tree_to_tree::Error>),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid date: {0}")]
    InvalidDate(String),
}

// Manual From implementations for unboxed to boxed conversions
impl From<gix::open::Error> for RepotallyError {
    fn from(err: gix::open::Error) -> Self {
        RepotallyError::Git(Box::new(err))
    }
}

impl From<gix::clone::Error> for RepotallyError {
    fn from(err: gix::clone::Error) -> Self {
        RepotallyError::Clone(Box::new(err))
    }
}

impl From<gix::clone::fetch::Error> for RepotallyError {
    fn from(err: gix::clone::fetch::Error) -> Self {
        RepotallyError::CloneFetch(Box::new(err))
    }
}

impl From<gix::object::find::existing::Error> for RepotallyError {
    fn from(err: gix::object::find::existing::Error) -> Self {
        RepotallyError::ObjectFind(Box::new(err))
    }
}

impl From<gix::object::commit::Error> for RepotallyError {
    fn from(err: gix::object::commit::Error) -> Self {
        RepotallyError::Commit(Box::new(err))
    }
}

impl From<gix::reference::find::existing::Error> for RepotallyError {
    fn from(err: gix::reference::find::existing::Error) -> Self {
        RepotallyError::RefFind(Box::new(err))
    }
}

impl From<gix::head::peel::to_commit::Error> for RepotallyError {
    fn from(err: gix::head::peel::to_commit::Error) -> Self {
        RepotallyError::HeadPeel(Box::new(err))
    }
}

impl From<gix::object::find::existing::with_conversion::Error> for RepotallyError {
    fn from(err: gix::object::find::existing::with_conversion::Error) -> Self {
        RepotallyError::ObjectFindConv(Box::new(err))
    }
}

impl From<gix::objs::decode::Error> for RepotallyError {
    fn from(err: gix::objs::decode::Error) -> Self {
        RepotallyError::ObjectDecode(Box::new(err))
    }
}

impl From<gix::repository::diff_tree_to_tree::Error> for RepotallyError {
    fn from(err: gix::repository::diff_tree_to_tree::Error) -> Self {
        RepotallyError::DiffTreeToTree(Box::new(err))
    }
}
