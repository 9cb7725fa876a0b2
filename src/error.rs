use derive_more::From;

pub type Result<T> = core::result::Result<T, Error>;

#[derive(Debug, From)]
pub enum Error {
    /// Requested cluster count is zero or exceeds the number of foreground pixels
    InvalidClusterCount { requested: usize, foreground: usize },
    // -- Externals
    #[from]
    Io(std::io::Error),
    #[from]
    Image(image::error::ImageError),
    #[from]
    Pattern(glob::PatternError),
    #[from]
    Glob(glob::GlobError),
}
