use std::{
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
};

use color_eyre::{Section, eyre::eyre};
use rayon::prelude::*;
use serde::Serialize;
use tracing::{debug, info, warn};
use walkdir::WalkDir;

use crate::{
    config::{
        DirectoryClassifier, FrontmatterClassifier, INPUT_DIR, OUTPUT_DIR, SITE_DATA_FILE,
        SiteConfig, ThemeConfig,
    },
    date::{FormatOptions, format_naive_date, parse_date_value},
    derive::{DeriveOptions, extend_page_data},
    front_matter::ParsedSource,
    posts::{Post, posts},
    types::{Page, RelPath},
    utils::{fill_permalink, slugify, source_route, split_dated_stem, with_trailing_slash},
};

type Source = (PathBuf, String);

/// Collect the site under `root` and write its site data file.
pub fn build_at(root: &Path) -> color_eyre::Result<()> {
    collect_at(root)?.emit()
}

/// Discover, parse, classify and derive every page under `root` without
/// writing anything.
pub fn collect_at(root: &Path) -> color_eyre::Result<Site> {
    let ctx = BuildCtx::load_at(root)?;

    let site = Pipeline::new(ctx)
        .discover()?
        .parse()?
        .classify()?
        .derive()?
        .into_site();
    Ok(site)
}

struct BuildCtx {
    input_dir: PathBuf,
    output_dir: PathBuf,
    config: SiteConfig,
}

impl BuildCtx {
    fn load_at(root: &Path) -> color_eyre::Result<Self> {
        let root = root.to_path_buf();
        let config = SiteConfig::load_at(&root)?;

        Ok(Self {
            input_dir: root.join(INPUT_DIR),
            output_dir: root.join(OUTPUT_DIR),
            config,
        })
    }
}

/// A fully derived site, ready to hand to the template layer.
#[derive(Debug)]
pub struct Site {
    pub config: SiteConfig,
    pub pages: Vec<Page>,
    pub classifiers: Vec<Classifier>,
    output_dir: PathBuf,
}

impl Site {
    /// Pages of the post collection, dated from their routes.
    pub fn posts(&self) -> impl Iterator<Item = Post<'_>> {
        posts(&self.pages, self.config.blog.post_collection())
    }

    pub fn site_data(&self) -> SiteData<'_> {
        let format = FormatOptions::from_theme(&self.config.theme);
        let date_format = self.config.theme.date_format.as_str();

        let posts: Vec<PostEntry<'_>> = self
            .posts()
            .map(|post| PostEntry {
                created_at_formatted: post
                    .created_at
                    .map(|d| format_naive_date(d, date_format, &format)),
                post,
            })
            .collect();

        let pagination = paginate(
            &self.config.blog.directories,
            self.config.blog.pagination.length_per_page,
            &posts,
        );

        SiteData {
            title: &self.config.site.title,
            description: &self.config.site.description,
            hostname: &self.config.site.hostname,
            theme_config: &self.config.theme,
            plugins: &self.config.plugins,
            pages: &self.pages,
            posts,
            classifiers: &self.classifiers,
            pagination,
        }
    }

    /// Write the site data as JSON into the output directory.
    pub fn emit(&self) -> color_eyre::Result<()> {
        fs::create_dir_all(&self.output_dir)
            .with_note(|| format!("While creating {}", self.output_dir.display()))?;

        let out_path = self.output_dir.join(SITE_DATA_FILE);
        let json = serde_json::to_string_pretty(&self.site_data())?;
        fs::write(&out_path, json).with_note(|| format!("While writing {}", out_path.display()))?;

        info!(path = %out_path.display(), pages = self.pages.len(), "wrote site data");
        Ok(())
    }
}

/// Everything templates need, in one serialisable value.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteData<'a> {
    pub title: &'a str,
    pub description: &'a str,
    pub hostname: &'a str,
    pub theme_config: &'a ThemeConfig,
    pub plugins: &'a BTreeMap<String, toml::Value>,
    pub pages: &'a [Page],
    pub posts: Vec<PostEntry<'a>>,
    pub classifiers: &'a [Classifier],
    pub pagination: Vec<PaginationPage>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostEntry<'a> {
    #[serde(flatten)]
    pub post: Post<'a>,
    pub created_at_formatted: Option<String>,
}

/// Pages generated from one frontmatter classifier, e.g. tags.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Classifier {
    pub id: String,
    pub path: String,
    pub items: Vec<ClassifierItem>,
}

/// One value of a classifier and the routes of the pages carrying it.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ClassifierItem {
    pub key: String,
    pub path: String,
    pub pages: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PaginationPage {
    pub path: String,
    pub posts: Vec<String>,
}

fn discover_sources(ctx: &BuildCtx) -> color_eyre::Result<Vec<Source>> {
    let mut md_paths: Vec<PathBuf> = Vec::new();
    let mut walk_errors: Vec<walkdir::Error> = Vec::new();

    for item in WalkDir::new(&ctx.input_dir) {
        match item {
            Ok(entry) => {
                if entry.file_type().is_file()
                    && entry.path().extension().is_some_and(|ext| ext == "md")
                {
                    md_paths.push(entry.path().to_path_buf());
                }
            }
            Err(e) => walk_errors.push(e),
        }
    }

    if !walk_errors.is_empty() {
        return Err(eyre!(
            "Failed to open some directory entries: {walk_errors:?}"
        ));
    }

    md_paths.sort();

    let mut docs: Vec<Source> = Vec::with_capacity(md_paths.len());
    let mut file_errors: Vec<(PathBuf, std::io::Error)> = Vec::new();

    for path in md_paths {
        match fs::read_to_string(&path) {
            Ok(content) => docs.push((path, content)),
            Err(e) => file_errors.push((path, e)),
        }
    }

    if !file_errors.is_empty() {
        return Err(eyre!("Failed to open some files: {file_errors:?}"));
    }

    info!(count = docs.len(), dir = %ctx.input_dir.display(), "discovered sources");
    Ok(docs)
}

fn parse_sources(ctx: &BuildCtx, sources: Vec<Source>) -> color_eyre::Result<Vec<Page>> {
    let mut pages = Vec::with_capacity(sources.len());
    for (full_path, content) in sources {
        let rel_src = full_path
            .strip_prefix(&ctx.input_dir)
            .map(|p| p.to_owned())
            .map_err(|_| eyre!("Path outside input_dir"))?;
        let rel_src = RelPath::new(rel_src).ok_or_else(|| eyre!("Source path must be relative"))?;

        let parsed = ParsedSource::try_from(content.as_str()).unwrap_or_else(|e| {
            warn!(source = %rel_src.to_slash(), error = %e, "unreadable frontmatter");
            ParsedSource::body_only(&content)
        });

        let page = make_page(&ctx.config.blog.directories, rel_src, parsed);
        debug!(path = %page.path, "parsed page");
        pages.push(page);
    }
    Ok(pages)
}

fn make_page(directories: &[DirectoryClassifier], rel_src: RelPath, parsed: ParsedSource) -> Page {
    let ParsedSource {
        frontmatter,
        content,
    } = parsed;

    let rel = rel_src.as_path();
    let directory = directories
        .iter()
        .find(|dir| rel.starts_with(&dir.dirname));

    let mut page = match directory {
        Some(dir) => {
            let stem = rel
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_default();
            let (stem_date, stem_slug) = split_dated_stem(&stem);
            let date = frontmatter
                .get_str("date")
                .and_then(parse_date_value)
                .map(|dt| dt.date_naive())
                .or(stem_date);
            let slug = frontmatter.get_str("slug").unwrap_or(stem_slug);

            Page::new(fill_permalink(&dir.item_permalink, date, slug)).with_id(&dir.id)
        }
        None => Page::new(source_route(rel)),
    };

    page.frontmatter = frontmatter;
    page.stripped_content = Some(content);
    page.source = Some(rel_src);
    page
}

/// Synthesize the index and per-value pages of every frontmatter classifier.
fn classify_pages(
    classifiers: &[FrontmatterClassifier],
    pages: &mut Vec<Page>,
) -> Vec<Classifier> {
    let mut out = Vec::with_capacity(classifiers.len());

    for fc in classifiers {
        let base = with_trailing_slash(&fc.path);
        // Values sharing a slug share a route; the first spelling seen names it.
        let mut by_slug: BTreeMap<String, (String, Vec<String>)> = BTreeMap::new();
        for page in pages.iter() {
            for key in &fc.keys {
                for value in page.frontmatter.strings(key) {
                    let (_, routes) = by_slug
                        .entry(slugify(value))
                        .or_insert_with(|| (value.to_string(), Vec::new()));
                    if !routes.contains(&page.path) {
                        routes.push(page.path.clone());
                    }
                }
            }
        }

        let mut index = Page::new(base.clone()).with_id(&fc.id);
        index.frontmatter.set("layout", fc.layout.as_str());
        pages.push(index);

        let mut items = Vec::with_capacity(by_slug.len());
        for (slug, (key, routes)) in by_slug {
            let path = format!("{base}{slug}/");
            let mut page = Page::new(path.clone()).with_id(&fc.id);
            page.frontmatter.set("layout", fc.scope_layout.as_str());
            page.frontmatter.set("title", key.as_str());
            pages.push(page);

            items.push(ClassifierItem {
                key,
                path,
                pages: routes,
            });
        }

        info!(classifier = %fc.id, values = items.len(), "classified pages");
        out.push(Classifier {
            id: fc.id.clone(),
            path: base,
            items,
        });
    }

    out
}

fn paginate(
    directories: &[DirectoryClassifier],
    length_per_page: usize,
    posts: &[PostEntry<'_>],
) -> Vec<PaginationPage> {
    let base = directories
        .first()
        .map(|d| with_trailing_slash(&d.path))
        .unwrap_or_else(|| "/".to_string());

    posts
        .chunks(length_per_page.max(1))
        .enumerate()
        .map(|(i, chunk)| PaginationPage {
            path: if i == 0 {
                base.clone()
            } else {
                format!("{base}page/{}/", i + 1)
            },
            posts: chunk.iter().map(|p| p.post.page.path.clone()).collect(),
        })
        .collect()
}

trait PipelineStage {}
/// Pipeline typestate driver
struct Pipeline<S: PipelineStage> {
    ctx: BuildCtx,
    state: S,
}

// initial state
impl Pipeline<()> {
    fn new(ctx: BuildCtx) -> Self {
        Self { ctx, state: () }
    }

    fn discover(self) -> color_eyre::Result<Pipeline<Discovered>> {
        let docs = discover_sources(&self.ctx)?;
        Ok(Pipeline {
            ctx: self.ctx,
            state: Discovered(docs),
        })
    }
}

struct Discovered(Vec<Source>);
impl PipelineStage for Discovered {}
struct Parsed(Vec<Page>);
impl PipelineStage for Parsed {}
struct Classified {
    pages: Vec<Page>,
    classifiers: Vec<Classifier>,
}
impl PipelineStage for Classified {}
struct Derived {
    pages: Vec<Page>,
    classifiers: Vec<Classifier>,
}
impl PipelineStage for Derived {}
impl PipelineStage for () {}

impl Pipeline<Discovered> {
    fn parse(self) -> color_eyre::Result<Pipeline<Parsed>> {
        let parsed = parse_sources(&self.ctx, self.state.0)?;
        Ok(Pipeline {
            ctx: self.ctx,
            state: Parsed(parsed),
        })
    }
}

impl Pipeline<Parsed> {
    fn classify(self) -> color_eyre::Result<Pipeline<Classified>> {
        let mut pages = self.state.0;
        let classifiers = classify_pages(&self.ctx.config.blog.frontmatters, &mut pages);
        Ok(Pipeline {
            ctx: self.ctx,
            state: Classified { pages, classifiers },
        })
    }
}

impl Pipeline<Classified> {
    fn derive(self) -> color_eyre::Result<Pipeline<Derived>> {
        let Classified {
            mut pages,
            classifiers,
        } = self.state;

        let config = &self.ctx.config;
        let options = DeriveOptions::new(&config.blog, &config.summary);
        pages
            .par_iter_mut()
            .for_each(|page| extend_page_data(page, &options));

        Ok(Pipeline {
            ctx: self.ctx,
            state: Derived { pages, classifiers },
        })
    }
}

impl Pipeline<Derived> {
    fn into_site(self) -> Site {
        Site {
            config: self.ctx.config,
            pages: self.state.pages,
            classifiers: self.state.classifiers,
            output_dir: self.ctx.output_dir,
        }
    }
}
