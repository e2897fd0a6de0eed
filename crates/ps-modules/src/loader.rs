//! Module loading and symbol-table assembly.
//!
//! A module document whose body is a mapping is a set of named bindings:
//! the optional `import` entry is satisfied first, then every other entry is
//! evaluated in order against the symbols accumulated so far, so later
//! bindings can reference earlier ones. Any failure abandons the table
//! wholesale; a partially-built module is never observable.

use crate::error::LoadError;
use crate::host::ModuleHost;
use futures::future::BoxFuture;
use ps_eval::{global_scope, Env};
use ps_types::{Eval, PsError, PsMap, Value, ValueKind};
use tracing::debug;
use url::Url;

/// A loaded module: where it came from, its evaluated exports, and its
/// literal body.
#[derive(Debug)]
pub struct Module {
    pub location: Url,
    pub symbols: PsMap,
    pub body: Value,
}

/// Load the module at `location`, resolving relative locations against
/// `base`. Each call fetches fresh; the loader keeps no cache.
pub async fn load(
    location: &str,
    base: Option<&Url>,
    host: &dyn ModuleHost,
) -> Result<Module, LoadError> {
    let url = resolve(location, base)?;
    load_url(url, host).await
}

fn resolve(location: &str, base: Option<&Url>) -> Result<Url, LoadError> {
    match Url::parse(location) {
        Ok(url) => Ok(url),
        Err(source) => match base {
            Some(base) => base.join(location).map_err(|source| LoadError::InvalidLocation {
                location: location.to_string(),
                source,
            }),
            None => Err(LoadError::InvalidLocation {
                location: location.to_string(),
                source,
            }),
        },
    }
}

// Boxed so imports can recurse through it.
fn load_url(url: Url, host: &dyn ModuleHost) -> BoxFuture<'_, Result<Module, LoadError>> {
    Box::pin(async move {
        // A native module's default export enters the same body handling as
        // a parsed document; only the source of the value differs.
        let body = if host.is_native(&url) {
            debug!(%url, "importing native module");
            host.import_native(&url).await?
        } else {
            debug!(%url, "fetching module");
            let source = host.fetch(&url).await?;
            ps_parser::parse(&source, url.as_str())?
        };

        let Some(entries) = body.as_map().cloned() else {
            // A non-mapping document exports nothing.
            return Ok(Module {
                location: url,
                symbols: PsMap::new(),
                body,
            });
        };

        // Validate every binding key before evaluating anything.
        let globals = global_scope();
        for (key, _) in entries.iter() {
            let Some(name) = key.as_str() else {
                return Err(PsError::type_error(
                    format!(
                        "module binding keys must be plain strings, got a {}",
                        key.kind_name()
                    ),
                    key.span,
                )
                .into());
            };
            if globals.get_str(name).is_some() {
                return Err(LoadError::GlobalOverride {
                    name: name.to_string(),
                });
            }
        }

        let mut symbols = PsMap::new();
        if let Some(import) = entries.get_str("import") {
            resolve_import(import, &url, host, &mut symbols).await?;
        }

        let env = Env::new();
        for (key, value) in entries.iter() {
            let Some(name) = key.as_str() else { continue };
            if name == "import" {
                continue;
            }
            debug!(%url, binding = name, "evaluating module binding");
            let evaluated = env.eval(value, &symbols).await?;
            symbols.insert(Value::string(name), evaluated);
        }
        debug!(%url, exports = symbols.len(), "module loaded");

        Ok(Module {
            location: url,
            symbols,
            body,
        })
    })
}

/// Satisfy a module's `import` entry: load the dependency (relative to the
/// importing module) and copy the named symbols out of its exports.
async fn resolve_import(
    import: &Value,
    url: &Url,
    host: &dyn ModuleHost,
    symbols: &mut PsMap,
) -> Result<(), LoadError> {
    let entries = import.as_map().ok_or_else(|| LoadError::InvalidImportShape {
        message: format!("'import' must be a mapping, got a {}", import.kind_name()),
    })?;

    let from = entries
        .get_str("from")
        .ok_or(LoadError::MissingImportField { field: "from" })?;
    let from = from.as_str().ok_or_else(|| LoadError::InvalidImportShape {
        message: format!("'from' must be a plain string, got a {}", from.kind_name()),
    })?;

    let names = entries
        .get_str("names")
        .ok_or(LoadError::MissingImportField { field: "names" })?;
    let names = match &names.kind {
        ValueKind::List(items) => items,
        _ => {
            return Err(LoadError::InvalidImportShape {
                message: format!("'names' must be a list, got a {}", names.kind_name()),
            })
        }
    };

    let dep_url = resolve(from, Some(url))?;
    debug!(%url, dependency = %dep_url, "loading dependency");
    let dep = load_url(dep_url, host)
        .await
        .map_err(|source| LoadError::Dependency {
            url: url.to_string(),
            source: Box::new(source),
        })?;

    for name_value in names {
        let ValueKind::Ref(r) = &name_value.kind else {
            return Err(LoadError::InvalidImportShape {
                message: format!(
                    "import names must be references, got a {}",
                    name_value.kind_name()
                ),
            });
        };
        let name = r.name();
        let value = dep
            .symbols
            .get_str(name)
            .ok_or_else(|| LoadError::UndefinedExport {
                from: from.to_string(),
                name: name.to_string(),
            })?;
        symbols.insert(Value::string(name), value.clone());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absolute_locations_ignore_the_base() {
        let base = Url::parse("file:///a/b.ps").unwrap();
        let url = resolve("file:///c/d.ps", Some(&base)).unwrap();
        assert_eq!(url.as_str(), "file:///c/d.ps");
    }

    #[test]
    fn relative_locations_join_against_the_base() {
        let base = Url::parse("file:///a/b.ps").unwrap();
        let url = resolve("./sibling.ps", Some(&base)).unwrap();
        assert_eq!(url.as_str(), "file:///a/sibling.ps");
    }

    #[test]
    fn relative_location_without_a_base_fails() {
        assert!(matches!(
            resolve("./lonely.ps", None),
            Err(LoadError::InvalidLocation { .. })
        ));
    }
}
