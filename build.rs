use indoc::indoc;
use std::env;
use std::fs;
use std::path::Path;

const ABOUT_REL: &str = "assets/about.md";
const PROJECTS_REL: &str = "assets/projects.json";

fn modified_rfc3339(path: &Path) -> String {
    match fs::metadata(path).and_then(|m| m.modified()) {
        Ok(t) => {
            let dt: chrono::DateTime<chrono::Local> = chrono::DateTime::from(t);
            dt.to_rfc3339()
        }
        Err(_) => String::new(),
    }
}

/// Copy an asset into OUT_DIR and return its basename.
fn stage(manifest: &str, out_dir: &str, rel: &str) -> String {
    let src = Path::new(manifest).join(rel);
    println!("cargo:rerun-if-changed={}", src.display());
    let basename = Path::new(rel)
        .file_name()
        .and_then(|s| s.to_str())
        .expect("invalid asset filename")
        .to_string();
    fs::copy(&src, Path::new(out_dir).join(&basename))
        .unwrap_or_else(|err| panic!("failed to copy {rel} to OUT_DIR: {err}"));
    basename
}

fn main() {
    let manifest = env::var("CARGO_MANIFEST_DIR").expect("CARGO_MANIFEST_DIR not set");
    let out_dir = env::var("OUT_DIR").expect("OUT_DIR not set");

    let about = stage(&manifest, &out_dir, ABOUT_REL);
    let projects = stage(&manifest, &out_dir, PROJECTS_REL);
    let about_modified =
        modified_rfc3339(&Path::new(&manifest).join(ABOUT_REL)).replace('"', "\\\"");

    let gen_src = format!(
        indoc!(
            r#"
                pub struct EmbeddedAsset {{ pub content: &'static str, pub modified_rfc3339: &'static str }}

                pub const EMBEDDED_ABOUT: EmbeddedAsset = EmbeddedAsset {{
                    content: include_str!(concat!(env!("OUT_DIR"), "/{about}")),
                    modified_rfc3339: "{rfc}",
                }};

                pub const EMBEDDED_PROJECTS_JSON: &str = include_str!(concat!(env!("OUT_DIR"), "/{projects}"));
            "#
        ),
        about = about,
        projects = projects,
        rfc = about_modified,
    );
    let gen_path = Path::new(&out_dir).join("generated_assets.rs");
    fs::write(&gen_path, gen_src).expect("failed to write generated_assets.rs to OUT_DIR");
}
