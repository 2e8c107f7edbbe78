//! Point values awarded for community engagement. Shared by the
//! controllers that award them and the guidelines page that lists them.

pub const CREATE_POST: u32 = 10;
pub const COMMENT_ON_POST: u32 = 5;
pub const LIKE_POST: u32 = 2;
pub const COMPLETE_LESSON: u32 = 20;
pub const FINISH_COURSE: u32 = 100;
pub const HELP_OTHERS: u32 = 15;
