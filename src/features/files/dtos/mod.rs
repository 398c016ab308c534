mod file_dto;

pub use file_dto::{
    accept_attribute, get_extension_from_content_type, is_previewable, CreateFolderDto,
    FolderResponseDto, UploadedFileDto,
};
