mod assembler;
mod session;

pub use assembler::PageAssembler;
pub use session::FeedSession;
