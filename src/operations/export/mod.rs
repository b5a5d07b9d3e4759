mod gauss_code;

pub use gauss_code::{ExportGaussCode, GaussCode, GaussExport, GaussToken, Passage};
