// Resume upload: multipart intake, temp-file spooling, and text extraction.
// Hands extracted text to the skill extractor and question selector.

pub mod extract;
pub mod handlers;
