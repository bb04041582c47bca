// build.rs
fn main() {
    #[cfg(windows)]
    {
        let mut res = winres::WindowsResource::new();
        res.set_icon("assets/receipt.ico");    // 32×32 .ico
        res.compile().unwrap();
    }
}
