/// The URL a printed QR image encodes: the public scan landing page
/// for the code.
pub fn access_url(base_url: &str, code: &str) -> String {
    format!("{}/qr/{}", base_url.trim_end_matches('/'), code)
}

/// Where the admin panel downloads the rendered PNG for a code.
pub fn download_url(base_url: &str, code: &str) -> String {
    format!("{}/api/qr/download/{}", base_url.trim_end_matches('/'), code)
}
