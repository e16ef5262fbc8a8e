//! Rendering of the generated PHP files
//!
//! Every renderer returns the complete file contents so that nothing touches
//! the disk until all tables have been computed.

use std::collections::BTreeMap;
use std::fmt::Write;

use super::paths::PathResolver;
use super::rules::MergedAutoloads;

pub const NAMESPACES_FILE: &str = "autoload_namespaces.php";
pub const CLASSMAP_FILE: &str = "autoload_classmap.php";
pub const INCLUDE_PATHS_FILE: &str = "include_paths.php";
pub const BOOTSTRAP_FILE: &str = "autoload.php";
pub const CLASS_LOADER_FILE: &str = "ClassLoader.php";

/// Runtime loader copied next to the generated tables
pub const CLASS_LOADER: &str = include_str!("ClassLoader.php");

/// Export a string as a single-quoted PHP literal
pub fn export_str(value: &str) -> String {
    let escaped = value.replace('\\', "\\\\").replace('\'', "\\'");
    format!("'{escaped}'")
}

fn header(file_name: &str, resolver: &PathResolver) -> String {
    format!(
        "<?php\n\n// {file_name} generated by autoload\n\n$vendorDir = {};\n$baseDir = {};\n\nreturn array(\n",
        resolver.vendor_dir_code(),
        resolver.base_dir_code()
    )
}

fn export_paths(resolver: &PathResolver, paths: &[String]) -> String {
    match paths {
        [single] => resolver.path_code(single),
        paths => {
            let codes: Vec<_> = paths.iter().map(|p| resolver.path_code(p)).collect();
            format!("array({})", codes.join(", "))
        }
    }
}

/// Namespace prefix table, most specific prefix first, fallback bucket last
pub fn render_namespaces(resolver: &PathResolver, autoloads: &MergedAutoloads) -> String {
    let mut out = header(NAMESPACES_FILE, resolver);
    for (prefix, paths) in &autoloads.namespaces {
        let _ = writeln!(
            out,
            "    {} => {},",
            export_str(prefix),
            export_paths(resolver, paths)
        );
    }
    if !autoloads.fallback.is_empty() {
        let _ = writeln!(out, "    '' => {},", export_paths(resolver, &autoloads.fallback));
    }
    out.push_str(");\n");
    out
}

/// Class name to file table
pub fn render_classmap(resolver: &PathResolver, classmap: &BTreeMap<String, String>) -> String {
    let mut out = header(CLASSMAP_FILE, resolver);
    for (class, path) in classmap {
        let _ = writeln!(out, "    {} => {},", export_str(class), resolver.path_code(path));
    }
    out.push_str(");\n");
    out
}

/// Include path list, in package then declaration order
pub fn render_include_paths(resolver: &PathResolver, include_paths: &[String]) -> String {
    let mut out = header(INCLUDE_PATHS_FILE, resolver);
    for path in include_paths {
        let _ = writeln!(out, "    {},", resolver.path_code(path));
    }
    out.push_str(");\n");
    out
}

/// Bootstrap file registering the tables with the class loader
pub fn render_bootstrap(with_include_paths: bool) -> String {
    let mut out = String::from(
        "<?php

// autoload.php generated by autoload

if (!class_exists('Autoload\\\\ClassLoader', false)) {
    require __DIR__ . '/ClassLoader.php';
}

return call_user_func(function () {
    $loader = new \\Autoload\\ClassLoader();

    $map = require __DIR__ . '/autoload_namespaces.php';
    foreach ($map as $namespace => $path) {
        $loader->add($namespace, $path);
    }

    $classMap = require __DIR__ . '/autoload_classmap.php';
    if ($classMap) {
        $loader->addClassMap($classMap);
    }
",
    );

    if with_include_paths {
        out.push_str(
            "
    if (!defined('AUTOLOAD_INCLUDE_PATHS_APPLIED')) {
        define('AUTOLOAD_INCLUDE_PATHS_APPLIED', true);
        $includePaths = require __DIR__ . '/include_paths.php';
        $includePaths[] = get_include_path();
        set_include_path(implode(PATH_SEPARATOR, $includePaths));
    }
",
        );
    }

    out.push_str(
        "
    $loader->register();

    return $loader;
});
",
    );
    out
}
