fn main() {
    #[cfg(feature = "cli")]
    glyphcrack::cli::run();

    #[cfg(not(feature = "cli"))]
    {
        eprintln!("glyphcrack: CLI not enabled. Rebuild with `--features cli`.");
        std::process::exit(1);
    }
}
