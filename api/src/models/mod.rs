mod comment;
mod like;
mod post;
mod user;

pub use comment::{Comment, CommentView, NewComment};
pub use like::Like;
pub use post::{NewPost, Post, PostCounts, PostQuery, PostSort, PostView};
pub use user::{Author, NewUser, ProfileUpdate, User};
