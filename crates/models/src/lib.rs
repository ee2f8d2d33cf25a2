//! Brand data and the JSON shapes exchanged between the Brandmark server and its clients.

pub mod brand;
pub mod logo;
pub mod response;

pub use brand::{BrandData, PREDEFINED_COLORS, ParseToneError, Tone};
pub use logo::{
    DEFAULT_DOWNLOAD_FILENAME, DownloadLogoQuery, GenerateLogoRequest, GenerateLogoResponse,
    GeneratedLogo, download_filename,
};
pub use response::{ErrorResponse, GeneratePromptsResponse, HealthResponse};
