use crate::enumeration::Enum;
use crate::message::Message;
use crate::metadata::Metadata;
use crate::query::Selection;
use crate::service::Service;

define_view! {
    /// A schema source file.
    File => FileRecord, FileId
}

impl<'m> File<'m> {
    /// Package name; empty when the file declares none.
    pub fn package(&self) -> &'m str {
        &self.record.package
    }

    /// `"proto2"` or `"proto3"`.
    pub fn syntax(&self) -> &'m str {
        &self.record.syntax
    }

    /// Names of the files this file imports.
    pub fn dependencies(&self) -> &'m [String] {
        &self.record.dependencies
    }

    pub fn meta(&self) -> &'m Metadata {
        &self.record.meta
    }

    /// Top-level messages, in declaration order.
    pub fn messages(&self) -> Selection<Message<'m>> {
        let mut out: Vec<_> = self
            .record
            .messages
            .iter()
            .map(|id| Message::new(self.model, self.model.registry.messages.resolve(id)))
            .collect();
        out.sort_by_key(|m| m.record.order);
        out.into()
    }

    /// Top-level enums, in declaration order.
    pub fn enums(&self) -> Selection<Enum<'m>> {
        self.record
            .enums
            .iter()
            .map(|id| Enum::new(self.model, self.model.registry.enums.resolve(id)))
            .collect()
    }

    pub fn services(&self) -> Selection<Service<'m>> {
        self.record
            .services
            .iter()
            .map(|id| Service::new(self.model, self.model.registry.services.resolve(id)))
            .collect()
    }

    /// Name a Go generator should use for this file's package.
    ///
    /// 1. `go_package` with a `;`: the part after it.
    /// 2. `go_package` without: its last path segment.
    /// 3. No `go_package`: the last path segment of the file name.
    pub fn go_package_name(&self) -> &'m str {
        match self.go_package() {
            None => base(&self.record.name),
            Some(pkg) => match pkg.split_once(';') {
                Some((_, name)) => name,
                None => base(pkg),
            },
        }
    }

    /// Import path a Go generator should use for this file's package.
    ///
    /// 1. `go_package` with a `;`: the part before it.
    /// 2. `go_package` without: the whole value.
    /// 3. No `go_package`: the file name's directory, or the file name itself
    ///    when it has none.
    pub fn go_package_import(&self) -> &'m str {
        match self.go_package() {
            Some(pkg) => pkg.split_once(';').map_or(pkg, |(import, _)| import),
            None => match dir(&self.record.name) {
                "." => &self.record.name,
                d => d,
            },
        }
    }

    fn go_package(&self) -> Option<&'m str> {
        self.record
            .options
            .string("goPackage")
            .filter(|s| !s.is_empty())
    }
}

/// Last slash-separated segment, ignoring trailing slashes.
fn base(path: &str) -> &str {
    if path.is_empty() {
        return ".";
    }
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() {
        return "/";
    }
    trimmed.rsplit('/').next().unwrap_or(trimmed)
}

/// Everything before the last slash; `"."` when there is none.
fn dir(path: &str) -> &str {
    match path.rfind('/') {
        None => ".",
        Some(0) => "/",
        Some(i) => &path[..i],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_and_dir() {
        assert_eq!(base("github.com/acme/api"), "api");
        assert_eq!(base("github.com/acme/api/"), "api");
        assert_eq!(base("foo.proto"), "foo.proto");
        assert_eq!(base(""), ".");
        assert_eq!(dir("acme/v1/order.proto"), "acme/v1");
        assert_eq!(dir("order.proto"), ".");
        assert_eq!(dir("/order.proto"), "/");
    }
}
