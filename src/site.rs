//! Static-site generation on top of the markdown converter.
//!
//! Reads markdown pages from a content tree, renders each through the page
//! template, and mirrors static assets into the output directory.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::config::{Config, TemplateConfig};
use crate::error::Error;
use crate::{extract_title, markdown_to_html};

#[derive(Debug, thiserror::Error)]
pub enum SiteError {
    #[error("I/O error at {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to convert {path}")]
    Convert {
        path: PathBuf,
        #[source]
        source: Error,
    },

    #[error("no `# ` title line in {path}")]
    MissingTitle { path: PathBuf },

    #[error("source path does not exist: {path}")]
    MissingSource { path: PathBuf },
}

/// Counts of work done by [`build_site`].
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct BuildReport {
    pub pages: usize,
    pub static_files: usize,
}

fn io_err(path: &Path) -> impl FnOnce(io::Error) -> SiteError + '_ {
    move |source| SiteError::Io {
        path: path.to_path_buf(),
        source,
    }
}

/// Render one markdown file into `dest` using the template at `template_path`.
pub fn generate_page(
    from: &Path,
    template_path: &Path,
    dest: &Path,
    placeholders: &TemplateConfig,
) -> Result<(), SiteError> {
    tracing::info!(
        from = %from.display(),
        dest = %dest.display(),
        template = %template_path.display(),
        "generating page"
    );

    let markdown = fs::read_to_string(from).map_err(io_err(from))?;
    let template = fs::read_to_string(template_path).map_err(io_err(template_path))?;

    let page = render_page(&markdown, &template, placeholders).map_err(|e| match e {
        PageError::MissingTitle => SiteError::MissingTitle {
            path: from.to_path_buf(),
        },
        PageError::Convert(source) => SiteError::Convert {
            path: from.to_path_buf(),
            source,
        },
    })?;

    if let Some(parent) = dest.parent() {
        fs::create_dir_all(parent).map_err(io_err(parent))?;
    }
    fs::write(dest, page).map_err(io_err(dest))
}

enum PageError {
    MissingTitle,
    Convert(Error),
}

/// Fill the template's title and content placeholders from `markdown`.
fn render_page(
    markdown: &str,
    template: &str,
    placeholders: &TemplateConfig,
) -> Result<String, PageError> {
    let content = markdown_to_html(markdown).map_err(PageError::Convert)?;
    let title = extract_title(markdown).ok_or(PageError::MissingTitle)?;

    Ok(template
        .replace(&placeholders.title_placeholder, &title)
        .replace(&placeholders.content_placeholder, &content))
}

/// Render every `.md` file under `content_dir` to a matching `.html` file
/// under `dest_dir`. Returns the number of pages written.
pub fn generate_pages_recursive(
    content_dir: &Path,
    template_path: &Path,
    dest_dir: &Path,
    placeholders: &TemplateConfig,
) -> Result<usize, SiteError> {
    let mut count = 0;

    for entry in sorted_entries(content_dir)? {
        let Some(name) = entry.file_name() else {
            continue;
        };
        let dest = dest_dir.join(name);

        if entry.is_dir() {
            count += generate_pages_recursive(&entry, template_path, &dest, placeholders)?;
        } else if entry.extension().is_some_and(|ext| ext == "md") {
            generate_page(&entry, template_path, &dest.with_extension("html"), placeholders)?;
            count += 1;
        }
    }

    Ok(count)
}

/// Recursively copy the contents of `source` into `dest`.
///
/// Returns the number of files copied.
pub fn copy_static(source: &Path, dest: &Path) -> Result<usize, SiteError> {
    if !source.exists() {
        return Err(SiteError::MissingSource {
            path: source.to_path_buf(),
        });
    }
    fs::create_dir_all(dest).map_err(io_err(dest))?;

    let mut count = 0;
    for entry in sorted_entries(source)? {
        let Some(name) = entry.file_name() else {
            continue;
        };
        let target = dest.join(name);
        if entry.is_dir() {
            count += copy_static(&entry, &target)?;
        } else {
            tracing::info!(from = %entry.display(), to = %target.display(), "copying static file");
            fs::copy(&entry, &target).map_err(io_err(&entry))?;
            count += 1;
        }
    }

    Ok(count)
}

/// Clean the output directory, copy static assets, and render all pages.
pub fn build_site(config: &Config) -> Result<BuildReport, SiteError> {
    let paths = &config.paths;

    if paths.output.exists() {
        tracing::info!(path = %paths.output.display(), "removing previous output");
        fs::remove_dir_all(&paths.output).map_err(io_err(&paths.output))?;
    }
    fs::create_dir_all(&paths.output).map_err(io_err(&paths.output))?;

    let static_files = if paths.static_dir.exists() {
        copy_static(&paths.static_dir, &paths.output)?
    } else {
        tracing::warn!(path = %paths.static_dir.display(), "static directory missing, skipping");
        0
    };

    let pages = generate_pages_recursive(
        &paths.content,
        &paths.template,
        &paths.output,
        &config.template,
    )?;

    tracing::info!(pages, static_files, "site build complete");
    Ok(BuildReport {
        pages,
        static_files,
    })
}

/// Directory entries of `dir` in name order, for reproducible builds.
fn sorted_entries(dir: &Path) -> Result<Vec<PathBuf>, SiteError> {
    let mut entries = fs::read_dir(dir)
        .map_err(io_err(dir))?
        .map(|entry| entry.map(|e| e.path()))
        .collect::<Result<Vec<_>, _>>()
        .map_err(io_err(dir))?;
    entries.sort();
    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PathsConfig;
    use pretty_assertions::assert_eq;

    const TEMPLATE: &str = "<title>{{ Title }}</title><body>{{ Content }}</body>";

    #[test]
    fn render_page_fills_placeholders() {
        let page = render_page("# Hi\n\ntext", TEMPLATE, &TemplateConfig::default()).ok();
        assert_eq!(
            page.as_deref(),
            Some("<title>Hi</title><body><div><h1>Hi</h1><p>text</p></div></body>")
        );
    }

    #[test]
    fn custom_placeholders() {
        let placeholders = TemplateConfig {
            title_placeholder: "%T%".to_string(),
            content_placeholder: "%C%".to_string(),
        };
        let page = render_page("# A", "%T%|%C%|%T%", &placeholders).ok();
        assert_eq!(page.as_deref(), Some("A|<div><h1>A</h1></div>|A"));
    }

    #[test]
    fn generate_page_requires_title() {
        let dir = tempfile::tempdir().unwrap();
        let from = dir.path().join("page.md");
        let template = dir.path().join("template.html");
        fs::write(&from, "no heading here").unwrap();
        fs::write(&template, TEMPLATE).unwrap();

        let result = generate_page(
            &from,
            &template,
            &dir.path().join("out/page.html"),
            &TemplateConfig::default(),
        );
        assert!(matches!(result, Err(SiteError::MissingTitle { .. })));
    }

    #[test]
    fn blank_title_line_is_missing_title() {
        let result = render_page("#   \n\nbody", TEMPLATE, &TemplateConfig::default());
        assert!(matches!(result, Err(PageError::MissingTitle)));
    }

    #[test]
    fn generate_page_reports_conversion_errors() {
        let dir = tempfile::tempdir().unwrap();
        let from = dir.path().join("page.md");
        let template = dir.path().join("template.html");
        fs::write(&from, "# Title\n\nunbalanced **bold").unwrap();
        fs::write(&template, TEMPLATE).unwrap();

        let result = generate_page(
            &from,
            &template,
            &dir.path().join("page.html"),
            &TemplateConfig::default(),
        );
        assert!(matches!(result, Err(SiteError::Convert { .. })));
    }

    #[test]
    fn copy_static_mirrors_tree() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("static");
        fs::create_dir_all(source.join("images/icons")).unwrap();
        fs::write(source.join("index.css"), "body {}").unwrap();
        fs::write(source.join("images/icons/a.svg"), "<svg/>").unwrap();

        let dest = dir.path().join("public");
        let copied = copy_static(&source, &dest).unwrap();

        assert_eq!(copied, 2);
        assert_eq!(fs::read_to_string(dest.join("index.css")).unwrap(), "body {}");
        assert_eq!(
            fs::read_to_string(dest.join("images/icons/a.svg")).unwrap(),
            "<svg/>"
        );
    }

    #[test]
    fn copy_static_missing_source() {
        let dir = tempfile::tempdir().unwrap();
        let result = copy_static(&dir.path().join("missing"), &dir.path().join("out"));
        assert!(matches!(result, Err(SiteError::MissingSource { .. })));
    }

    #[test]
    fn build_site_end_to_end() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join("content/blog")).unwrap();
        fs::create_dir_all(root.join("static")).unwrap();
        fs::create_dir_all(root.join("public")).unwrap();
        fs::write(root.join("public/stale.html"), "old").unwrap();
        fs::write(root.join("content/index.md"), "# Home\n\nWelcome *in*.").unwrap();
        fs::write(root.join("content/blog/post.md"), "# Post\n\n* one\n* two").unwrap();
        fs::write(root.join("content/notes.txt"), "ignored").unwrap();
        fs::write(root.join("static/site.css"), "p {}").unwrap();
        fs::write(root.join("template.html"), TEMPLATE).unwrap();

        let config = Config {
            paths: PathsConfig::default(),
            template: TemplateConfig::default(),
        }
        .rooted_at(root);

        let report = build_site(&config).unwrap();
        assert_eq!(
            report,
            BuildReport {
                pages: 2,
                static_files: 1
            }
        );

        let public = root.join("public");
        assert!(!public.join("stale.html").exists());
        assert!(!public.join("notes.txt").exists());
        assert!(public.join("site.css").exists());
        assert_eq!(
            fs::read_to_string(public.join("index.html")).unwrap(),
            "<title>Home</title><body><div><h1>Home</h1><p>Welcome <i>in</i>.</p></div></body>"
        );
        assert_eq!(
            fs::read_to_string(public.join("blog/post.html")).unwrap(),
            "<title>Post</title><body><div><h1>Post</h1><ul><li>one</li><li>two</li></ul></div></body>"
        );
    }
}
