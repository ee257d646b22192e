pub mod length;
pub mod stopword;
pub mod prefix;
