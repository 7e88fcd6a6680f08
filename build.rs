#[cfg(target_os = "windows")]
fn main() {
    use winresource::WindowsResource;

    let mut res = WindowsResource::new();
    if std::path::Path::new("res/rstoplogger.ico").exists() {
        res.set_icon("res/rstoplogger.ico");
    }
    res.set("FileDescription", "rStoplogger CLI")
        .set("ProductName", "rStoplogger")
        .set("OriginalFilename", "rstoplogger.exe")
        .set("FileVersion", env!("CARGO_PKG_VERSION"))
        .set("ProductVersion", env!("CARGO_PKG_VERSION"));

    if let Err(e) = res.compile() {
        println!("cargo:warning=Windows resources not embedded: {e}");
    }
}

#[cfg(not(target_os = "windows"))]
fn main() {}
