pub mod comment_tree;
pub mod likes;
pub mod ownership;

pub use comment_tree::{
    CommentNode, MAX_THREAD_DEPTH, Threaded, build_comment_tree, thread_depth,
};
pub use likes::toggle_like;
pub use ownership::{Owned, authorize};
