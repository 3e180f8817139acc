//! Loading and execution of a package's data module

use std::path::Path;

use rhai::module_resolvers::{FileModuleResolver, ModuleResolversCollection};
use rhai::{Dynamic, Engine, Scope};
use tracing::{debug, info};

use crate::error::ExtractError;

/// File name of the data module inside the package root.
pub const DATA_MODULE_FILE: &str = "data.rhai";

/// The executed data module of one plugin package.
///
/// Holds the variables the module's top-level code left behind and exposes
/// them as a record keyed by attribute name. The engine that produced the
/// scope is gone by the time this value exists; nothing of the run survives
/// outside of it.
#[derive(Debug)]
pub struct DataModule {
    package: String,
    scope: Scope<'static>,
}

impl DataModule {
    pub(crate) fn new(package: String, scope: Scope<'static>) -> Self {
        Self { package, scope }
    }

    /// Package this module was loaded from.
    pub fn package(&self) -> &str {
        &self.package
    }

    /// Look up a top-level table by attribute name and convert it to JSON.
    ///
    /// Returns `Ok(None)` when the module does not define the attribute. A
    /// defined attribute that is not plain data (a function pointer, for
    /// instance) is reported as a module failure naming the table.
    pub fn table(&self, name: &str) -> Result<Option<serde_json::Value>, ExtractError> {
        let Some(value) = self.scope.get_value::<Dynamic>(name) else {
            return Ok(None);
        };
        rhai::serde::from_dynamic(&value).map(Some).map_err(|e| {
            ExtractError::ModuleExecution {
                package: self.package.clone(),
                message: format!("table `{name}` is not plain data: {e}"),
            }
        })
    }
}

/// Execute the data module of `package_name` under `root_dir`, with imports
/// resolving against the package itself, the staging root, and the
/// Archipelago repository at `repo_dir`.
///
/// Each call builds its own engine, resolvers, and module cache, so repeated
/// loads in one process cannot observe each other — even when two packages
/// ship identically named module files.
pub fn load(
    root_dir: &Path,
    package_name: &str,
    repo_dir: &Path,
) -> Result<DataModule, ExtractError> {
    let package_dir = root_dir.join(package_name);
    let data_file = package_dir.join(DATA_MODULE_FILE);
    if !data_file.is_file() {
        return Err(ExtractError::Spec {
            package: package_name.to_string(),
            reason: format!("no {DATA_MODULE_FILE} at the package root"),
        });
    }

    let engine = data_engine(&package_dir, root_dir, repo_dir);

    let ast = engine.compile_file(data_file).map_err(|e| ExtractError::Spec {
        package: package_name.to_string(),
        reason: e.to_string(),
    })?;
    debug!("Compiled data module of package `{}`", package_name);

    // Top-level code runs exactly once; its variables land in the scope.
    let mut scope = Scope::new();
    engine
        .run_ast_with_scope(&mut scope, &ast)
        .map_err(|e| ExtractError::ModuleExecution {
            package: package_name.to_string(),
            message: e.to_string(),
        })?;
    info!("Executed data module of package `{}`", package_name);

    Ok(DataModule::new(package_name.to_string(), scope))
}

/// Build the engine for one load. Imports are tried against the package's
/// own directory first (sibling modules), then the staging root
/// (package-qualified paths), then the Archipelago repository.
fn data_engine(package_dir: &Path, root_dir: &Path, repo_dir: &Path) -> Engine {
    let mut engine = Engine::new();

    let mut resolvers = ModuleResolversCollection::new();
    resolvers.push(FileModuleResolver::new_with_path(package_dir));
    resolvers.push(FileModuleResolver::new_with_path(root_dir));
    resolvers.push(FileModuleResolver::new_with_path(repo_dir));
    engine.set_module_resolver(resolvers);

    engine
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write_package(root: &Path, package: &str, data_module: &str) {
        let package_dir = root.join(package);
        fs::create_dir_all(&package_dir).unwrap();
        fs::write(package_dir.join(DATA_MODULE_FILE), data_module).unwrap();
    }

    #[test]
    fn loads_tables_from_data_module() {
        let staging = TempDir::new().unwrap();
        let repo = TempDir::new().unwrap();
        write_package(
            staging.path(),
            "sample_game",
            r#"
                let game_table = #{ name: "Sample" };
                let item_table = [#{ name: "Sword", id: 1 }];
            "#,
        );

        let module = load(staging.path(), "sample_game", repo.path()).unwrap();
        assert_eq!(module.package(), "sample_game");

        let game = module.table("game_table").unwrap().unwrap();
        assert_eq!(game["name"], "Sample");
        let items = module.table("item_table").unwrap().unwrap();
        assert_eq!(items[0]["id"], 1);
        assert!(module.table("category_table").unwrap().is_none());
    }

    #[test]
    fn sibling_imports_resolve_within_the_package() {
        let staging = TempDir::new().unwrap();
        let repo = TempDir::new().unwrap();
        write_package(
            staging.path(),
            "sample_game",
            r#"
                import "names" as names;
                let game_table = #{ name: names::GAME_NAME };
            "#,
        );
        fs::write(
            staging.path().join("sample_game/names.rhai"),
            "export const GAME_NAME = \"Sample\";",
        )
        .unwrap();

        let module = load(staging.path(), "sample_game", repo.path()).unwrap();
        let game = module.table("game_table").unwrap().unwrap();
        assert_eq!(game["name"], "Sample");
    }

    #[test]
    fn package_qualified_imports_resolve_from_the_staging_root() {
        let staging = TempDir::new().unwrap();
        let repo = TempDir::new().unwrap();
        write_package(
            staging.path(),
            "sample_game",
            r#"
                import "sample_game/names" as names;
                let game_table = #{ name: names::GAME_NAME };
            "#,
        );
        fs::write(
            staging.path().join("sample_game/names.rhai"),
            "export const GAME_NAME = \"Sample\";",
        )
        .unwrap();

        let module = load(staging.path(), "sample_game", repo.path()).unwrap();
        let game = module.table("game_table").unwrap().unwrap();
        assert_eq!(game["name"], "Sample");
    }

    #[test]
    fn repository_imports_resolve_from_the_repo_dir() {
        let staging = TempDir::new().unwrap();
        let repo = TempDir::new().unwrap();
        write_package(
            staging.path(),
            "sample_game",
            r#"
                import "base_classes" as base;
                let game_table = #{ version: base::framework_version() };
            "#,
        );
        fs::write(
            repo.path().join("base_classes.rhai"),
            "fn framework_version() { \"0.5.0\" }",
        )
        .unwrap();

        let module = load(staging.path(), "sample_game", repo.path()).unwrap();
        let game = module.table("game_table").unwrap().unwrap();
        assert_eq!(game["version"], "0.5.0");
    }

    #[test]
    fn missing_data_module_is_a_spec_error() {
        let staging = TempDir::new().unwrap();
        let repo = TempDir::new().unwrap();
        fs::create_dir_all(staging.path().join("sample_game")).unwrap();

        let result = load(staging.path(), "sample_game", repo.path());
        assert!(matches!(result, Err(ExtractError::Spec { .. })));
    }

    #[test]
    fn unparsable_data_module_is_a_spec_error() {
        let staging = TempDir::new().unwrap();
        let repo = TempDir::new().unwrap();
        write_package(staging.path(), "sample_game", "let game_table = #{");

        let result = load(staging.path(), "sample_game", repo.path());
        assert!(matches!(result, Err(ExtractError::Spec { .. })));
    }

    #[test]
    fn runtime_failure_surfaces_the_module_diagnostic() {
        let staging = TempDir::new().unwrap();
        let repo = TempDir::new().unwrap();
        write_package(
            staging.path(),
            "sample_game",
            r#"throw "tables are broken";"#,
        );

        let result = load(staging.path(), "sample_game", repo.path());
        match result {
            Err(ExtractError::ModuleExecution { package, message }) => {
                assert_eq!(package, "sample_game");
                assert!(message.contains("tables are broken"));
            }
            other => panic!("expected ModuleExecution, got {other:?}"),
        }
    }

    #[test]
    fn unresolved_import_is_a_module_execution_error() {
        let staging = TempDir::new().unwrap();
        let repo = TempDir::new().unwrap();
        write_package(
            staging.path(),
            "sample_game",
            r#"
                import "no_such_module" as missing;
                let game_table = #{};
            "#,
        );

        let result = load(staging.path(), "sample_game", repo.path());
        assert!(matches!(result, Err(ExtractError::ModuleExecution { .. })));
    }
}
