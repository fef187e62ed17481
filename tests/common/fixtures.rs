/// The host page after mounting: a sidebar and the content column.
pub const SCAFFOLD: &str = concat!(
    r#"<main>"#,
    r#"<aside class="sidebar"><ul><li>Home</li></ul></aside>"#,
    r#"<section class="content"><article id="main" class="markdown-section"></article></section>"#,
    r#"</main>"#,
);

/// A guide page with anchored headings, as a markdown renderer emits them.
pub const GUIDE: &str = concat!(
    r##"<h1 id="guide"><a href="#/guide?id=guide" class="anchor"><span>Guide</span></a></h1>"##,
    r##"<h2 id="install"><a href="#/guide?id=install" class="anchor"><span>Install</span></a></h2>"##,
    "<p>Run the installer.</p>",
    r##"<h3 id="linux"><a href="#/guide?id=linux" class="anchor"><span>Linux</span></a></h3>"##,
    r##"<h3 id="macos"><a href="#/guide?id=macos" class="anchor"><span>macOS</span></a></h3>"##,
    r##"<h2 id="usage"><a href="#/guide?id=usage" class="anchor"><span>Usage</span></a></h2>"##,
    r##"<h4 id="flags"><a href="#/guide?id=flags" class="anchor"><span>Flags</span></a></h4>"##,
    r##"<h2 id="changelog"><a href="#/guide?id=changelog" class="anchor"><span>Changelog</span></a></h2>"##,
);

/// A page too short for a ToC.
pub const STUB: &str = "<h1>Stub</h1><h2>Only section</h2><p>Nothing else here.</p>";

/// A page with no headings at all.
pub const PROSE: &str = "<p>Just text.</p><p>More text.</p>";
