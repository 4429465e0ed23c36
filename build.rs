use std::fs;

/// Keys every section of the bundled config must define.
const REQUIRED: &[(&str, &[&str])] = &[
    ("paths", &["content", "static_dir", "output", "template"]),
    ("template", &["title_placeholder", "content_placeholder"]),
];

fn main() {
    let config_path = "src/default_config.toml";
    println!("cargo:rerun-if-changed={}", config_path);

    let content = fs::read_to_string(config_path).expect("Failed to read default_config.toml");
    let table = content
        .parse::<toml::Table>()
        .unwrap_or_else(|e| panic!("Invalid default_config.toml: {}", e));

    // `Config::compiled_default` falls back silently, so a typo here must fail the build.
    for (section, keys) in REQUIRED {
        let Some(section_table) = table.get(*section).and_then(|v| v.as_table()) else {
            panic!("default_config.toml: missing [{}] table", section);
        };
        for key in *keys {
            match section_table.get(*key).and_then(|v| v.as_str()) {
                Some(value) if !value.is_empty() => {}
                _ => panic!(
                    "default_config.toml: [{}] {} must be a non-empty string",
                    section, key
                ),
            }
        }
        if let Some(unknown) = section_table.keys().find(|k| !keys.contains(&k.as_str())) {
            panic!("default_config.toml: unknown key [{}] {}", section, unknown);
        }
    }
}
