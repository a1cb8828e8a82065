//! Swagger registration for the generated Web API entry point.
//!
//! The generated `Program.cs` is only ever touched through
//! [`patch_entrypoint`], a pure text transformation keyed on one marker
//! line. If the upstream template stops producing that line the patch
//! reports [`PatchOutcome::MarkerMissing`] and the file is left alone.

/// Entry point file name inside the presentation project.
pub const ENTRYPOINT_FILE: &str = "Program.cs";

/// The line where the application object is built.
pub const APP_BUILD_MARKER: &str = "var app = builder.Build();";

/// Present once Swagger middleware has been wired in.
pub const SWAGGER_MARKER: &str = "UseSwagger";

const BEFORE_BUILD: &[&str] = &[
    "builder.Services.AddEndpointsApiExplorer();",
    "builder.Services.AddSwaggerGen();",
];

const AFTER_BUILD: &[&str] = &["app.UseSwagger();", "app.UseSwaggerUI();"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PatchOutcome {
    /// New file contents with the middleware registered.
    Patched(String),
    /// The documentation middleware is already there; nothing to do.
    AlreadyPatched,
    /// [`APP_BUILD_MARKER`] does not occur in the source.
    MarkerMissing,
}

/// Insert Swagger registration around the app-build line.
///
/// Two service registrations and a blank line go before the marker line,
/// two activation calls right after it. Indentation of the marker line and
/// the file's line endings are preserved. Applying the patch to its own
/// output yields [`PatchOutcome::AlreadyPatched`].
pub fn patch_entrypoint(source: &str) -> PatchOutcome {
    if source.contains(SWAGGER_MARKER) {
        return PatchOutcome::AlreadyPatched;
    }

    let Some(marker_at) = source.find(APP_BUILD_MARKER) else {
        return PatchOutcome::MarkerMissing;
    };

    let newline = if source.contains("\r\n") { "\r\n" } else { "\n" };

    let line_start = source[..marker_at].rfind('\n').map_or(0, |i| i + 1);
    let indent: String = source[line_start..marker_at]
        .chars()
        .take_while(|c| *c == ' ' || *c == '\t')
        .collect();

    let marker_end = marker_at + APP_BUILD_MARKER.len();
    let line_end = source[marker_end..]
        .find('\n')
        .map_or(source.len(), |i| marker_end + i + 1);

    let mut out = String::with_capacity(source.len() + 160);
    out.push_str(&source[..line_start]);
    for line in BEFORE_BUILD {
        push_line(&mut out, &indent, line, newline);
    }
    out.push_str(newline);

    out.push_str(&source[line_start..line_end]);
    if !out.ends_with('\n') {
        out.push_str(newline);
    }
    for line in AFTER_BUILD {
        push_line(&mut out, &indent, line, newline);
    }

    out.push_str(&source[line_end..]);
    PatchOutcome::Patched(out)
}

fn push_line(out: &mut String, indent: &str, line: &str, newline: &str) {
    out.push_str(indent);
    out.push_str(line);
    out.push_str(newline);
}
