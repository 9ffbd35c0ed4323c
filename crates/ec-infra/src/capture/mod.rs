mod fs_image_source;

pub use fs_image_source::FsImageSource;
