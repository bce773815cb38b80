#[cfg(target_os = "windows")]
fn main() {
    let mut res = winres::WindowsResource::new();
    res.set("InternalName", "DirectoryBackup.exe")
        .set("FileDescription", "Scheduled directory backup setup")
        .set_version_info(winres::VersionInfo::PRODUCTVERSION, 0x0001000000000000)
        .set_language(0x0409);
    if let Err(err) = res.compile() {
        eprintln!("winres error: {err}");
    }
}

#[cfg(not(target_os = "windows"))]
fn main() {
}
