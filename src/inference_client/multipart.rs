use rand::RngCore;

/// A `multipart/form-data` body holding a single file part.
pub struct MultipartFile {
    pub boundary: String,
    pub body: Vec<u8>,
}

impl MultipartFile {
    pub fn new(field_name: &str, file_name: &str, content_type: &str, bytes: &[u8]) -> Self {
        let boundary = format!("----asl-practice-{:016x}", rand::rng().next_u64());
        Self::with_boundary(boundary, field_name, file_name, content_type, bytes)
    }

    pub fn with_boundary(
        boundary: String,
        field_name: &str,
        file_name: &str,
        content_type: &str,
        bytes: &[u8],
    ) -> Self {
        let mut body = Vec::with_capacity(bytes.len() + 256);
        body.extend_from_slice(format!("--{}\r\n", boundary).as_bytes());
        body.extend_from_slice(
            format!(
                "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\n",
                field_name, file_name
            )
            .as_bytes(),
        );
        body.extend_from_slice(format!("Content-Type: {}\r\n\r\n", content_type).as_bytes());
        body.extend_from_slice(bytes);
        body.extend_from_slice(format!("\r\n--{}--\r\n", boundary).as_bytes());

        Self { boundary, body }
    }

    pub fn content_type(&self) -> String {
        format!("multipart/form-data; boundary={}", self.boundary)
    }
}
