use windows::Win32::Globalization::{GetOEMCP, MULTI_BYTE_TO_WIDE_CHAR_FLAGS, MultiByteToWideChar};
use windows::Win32::System::Console::GetConsoleOutputCP;

/// Console tools such as `schtasks.exe` print in the console code page, which
/// is the OEM page on most installs and rarely UTF-8.
pub fn decode(bytes: &[u8]) -> String {
    if let Ok(text) = std::str::from_utf8(bytes) {
        return text.to_string();
    }
    let code_page = match unsafe { GetConsoleOutputCP() } {
        0 => unsafe { GetOEMCP() },
        code_page => code_page,
    };
    to_utf16(code_page, bytes)
        .map(|wide| String::from_utf16_lossy(&wide))
        .unwrap_or_else(|| String::from_utf8_lossy(bytes).into_owned())
}

fn to_utf16(code_page: u32, bytes: &[u8]) -> Option<Vec<u16>> {
    let flags = MULTI_BYTE_TO_WIDE_CHAR_FLAGS(0);
    let length = unsafe { MultiByteToWideChar(code_page, flags, bytes, None) };
    let mut wide = vec![0u16; usize::try_from(length).ok().filter(|length| *length > 0)?];
    let written = unsafe { MultiByteToWideChar(code_page, flags, bytes, Some(&mut wide)) };
    wide.truncate(usize::try_from(written).ok().filter(|written| *written > 0)?);
    Some(wide)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ascii_is_unchanged() {
        assert_eq!(decode(b"SUCCESS: done."), "SUCCESS: done.");
    }

    #[test]
    fn oem_bytes_decode_through_their_code_page() {
        // 0x81 is 'ü' in code pages 437 and 850.
        let wide = to_utf16(850, b"Aufgabe f\x81r Sicherung").unwrap();
        assert_eq!(String::from_utf16_lossy(&wide), "Aufgabe für Sicherung");
    }

    #[test]
    fn non_utf8_output_is_never_dropped() {
        assert!(!decode(b"ERROR: \x81\x84\x94").is_empty());
    }
}
