use super::*;
use std::path::PathBuf;

fn origin() -> PathBuf {
    PathBuf::from("registry.json")
}

const SAMPLE: &str = r#"{
    "$schema": "./just-install-v4.schema.json",
    "version": 4,
    "packages": {
        "7zip": {
            "version": "19.00",
            "installer": {
                "kind": "msi",
                "x86": "https://www.7-zip.org/a/7z{{.version}}.msi",
                "x86_64": "https://www.7-zip.org/a/7z{{.version}}-x64.msi"
            }
        },
        "arduino": {
            "version": "1.8.13",
            "installer": {
                "interactive": true,
                "kind": "nsis",
                "x86": "https://downloads.arduino.cc/arduino-{{.version}}-windows.exe"
            },
            "skipAudit": true
        },
        "adb": {
            "version": "latest",
            "installer": {
                "kind": "zip",
                "options": {
                    "destination": "{{.SYSTEMDRIVE}}\\Android",
                    "shims": ["{{.SYSTEMDRIVE}}\\Android\\platform-tools\\adb.exe"]
                },
                "x86": "https://dl.google.com/android/repository/platform-tools-latest-windows.zip"
            }
        },
        "python": {
            "version": "3.9.0",
            "installer": {
                "kind": "custom",
                "options": {
                    "x86": {
                        "arguments": ["{{.installer}}", "/quiet", "TargetDir=C:\\Python32"]
                    },
                    "x86_64": {
                        "arguments": ["{{.installer}}", "/quiet", "TargetDir=C:\\Python64"],
                        "shims": ["C:\\Python64\\python.exe"]
                    }
                },
                "x86": "https://www.python.org/ftp/python/{{.version}}/python-{{.version}}.exe",
                "x86_64": "https://www.python.org/ftp/python/{{.version}}/python-{{.version}}-amd64.exe"
            }
        },
        "futuretool": {
            "version": "1.0",
            "installer": {
                "kind": "wix-bundle",
                "x86": "https://example.com/futuretool.exe"
            }
        }
    }
}"#;

fn sample() -> Registry {
    Registry::parse(SAMPLE, &origin()).expect("sample registry parses")
}

#[test]
fn parses_sample_registry() {
    let registry = sample();
    assert_eq!(registry.version, 4);
    assert_eq!(registry.packages.len(), 5);
    assert_eq!(registry.schema.as_deref(), Some("./just-install-v4.schema.json"));

    let arduino = registry.get("arduino").unwrap();
    assert!(arduino.skip_audit);
    assert!(arduino.installer.interactive);
    assert_eq!(arduino.installer.kind, InstallerKind::Nsis);
}

#[test]
fn unknown_kind_is_preserved_not_rejected() {
    let registry = sample();
    let entry = registry.get("futuretool").unwrap();
    assert_eq!(
        entry.installer.kind,
        InstallerKind::Unknown("wix-bundle".to_string())
    );
    assert_eq!(entry.installer.kind.to_string(), "wix-bundle");
}

#[test]
fn sorted_package_names_are_lexicographic() {
    let registry = sample();
    assert_eq!(
        registry.sorted_package_names(),
        vec!["7zip", "adb", "arduino", "futuretool", "python"]
    );
}

#[test]
fn rejects_version_mismatch() {
    let doc = r#"{"version": 3, "packages": {}}"#;
    let err = Registry::parse(doc, &origin()).unwrap_err();
    match err {
        JustInstallError::RegistryVersion { expected, found } => {
            assert_eq!(expected, 4);
            assert_eq!(found, 3);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn version_mismatch_wins_over_shape_errors() {
    let doc = r#"{"version": 5, "packages": {"x": {"totally": "different"}}}"#;
    assert!(matches!(
        Registry::parse(doc, &origin()),
        Err(JustInstallError::RegistryVersion { found: 5, .. })
    ));
}

#[test]
fn rejects_malformed_json() {
    let err = Registry::parse("{not json", &origin()).unwrap_err();
    assert!(matches!(err, JustInstallError::RegistryParse { .. }));
}

#[test]
fn load_reads_from_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("registry.json");
    std::fs::write(&path, SAMPLE).unwrap();

    let registry = Registry::load(&path).unwrap();
    assert!(registry.get("7zip").is_some());
}

#[test]
fn load_missing_file_reports_path() {
    let err = Registry::load(std::path::Path::new("/nonexistent/registry.json")).unwrap_err();
    assert!(err.to_string().contains("/nonexistent/registry.json"));
}

#[test]
fn flat_options_apply_to_every_architecture() {
    let registry = sample();
    let installer = &registry.get("adb").unwrap().installer;

    let x86 = installer.options_for_arch(Architecture::X86).unwrap();
    let x64 = installer.options_for_arch(Architecture::X86_64).unwrap();
    assert_eq!(x86, x64);
    assert_eq!(x86.destination.as_deref(), Some("{{.SYSTEMDRIVE}}\\Android"));
    assert_eq!(x86.shims.len(), 1);
}

#[test]
fn per_arch_options_pick_the_requested_map() {
    let registry = sample();
    let installer = &registry.get("python").unwrap().installer;

    let x64 = installer.options_for_arch(Architecture::X86_64).unwrap();
    assert_eq!(x64.arguments[2], "TargetDir=C:\\Python64");
    assert_eq!(x64.shims, vec!["C:\\Python64\\python.exe".to_string()]);

    let x86 = installer.options_for_arch(Architecture::X86).unwrap();
    assert_eq!(x86.arguments[2], "TargetDir=C:\\Python32");
    assert!(x86.shims.is_empty());
}

#[test]
fn per_arch_options_fall_back_to_x86_on_64bit() {
    let doc = r#"{"version": 4, "packages": {"tool": {
        "version": "1",
        "installer": {
            "kind": "copy",
            "options": {"x86": {"destination": "C:\\tool.exe"}},
            "x86": "https://example.com/tool.exe"
        }
    }}}"#;
    let registry = Registry::parse(doc, &origin()).unwrap();
    let installer = &registry.get("tool").unwrap().installer;

    let options = installer.options_for_arch(Architecture::X86_64).unwrap();
    assert_eq!(options.destination.as_deref(), Some("C:\\tool.exe"));
}

#[test]
fn per_arch_options_missing_x86_is_an_error() {
    let doc = r#"{"version": 4, "packages": {"tool": {
        "version": "1",
        "installer": {
            "kind": "copy",
            "options": {"x86_64": {"destination": "C:\\tool.exe"}},
            "x86_64": "https://example.com/tool.exe"
        }
    }}}"#;
    let registry = Registry::parse(doc, &origin()).unwrap();
    let installer = &registry.get("tool").unwrap().installer;
    assert!(installer.options_for_arch(Architecture::X86).is_err());
}

#[test]
fn missing_options_are_empty() {
    let registry = sample();
    let options = registry
        .get("7zip")
        .unwrap()
        .installer
        .options_for_arch(Architecture::X86_64)
        .unwrap();
    assert_eq!(options, Options::default());
}

#[test]
fn container_options_decode() {
    let doc = r#"{"version": 4, "packages": {"app": {
        "version": "2",
        "installer": {
            "kind": "nsis",
            "options": {"container": {"kind": "zip", "installer": "setup.exe"}},
            "x86": "https://example.com/app.zip"
        }
    }}}"#;
    let registry = Registry::parse(doc, &origin()).unwrap();
    let options = registry
        .get("app")
        .unwrap()
        .installer
        .options_for_arch(Architecture::X86)
        .unwrap();
    let container = options.container.unwrap();
    assert_eq!(container.kind, ContainerKind::Zip);
    assert_eq!(container.installer.as_deref(), Some("setup.exe"));
}

#[test]
fn malformed_options_reject_the_registry() {
    let doc = r#"{"version": 4, "packages": {"app": {
        "version": "2",
        "installer": {
            "kind": "custom",
            "options": {"arguments": "not-a-list"},
            "x86": "https://example.com/app.exe"
        }
    }}}"#;
    assert!(Registry::parse(doc, &origin()).is_err());
}

#[test]
fn url_selection_prefers_matching_architecture() {
    let registry = sample();
    let installer = &registry.get("7zip").unwrap().installer;
    assert!(installer.url_for_arch(Architecture::X86_64).unwrap().ends_with("-x64.msi"));
    assert!(!installer.url_for_arch(Architecture::X86).unwrap().ends_with("-x64.msi"));
}

#[test]
fn url_selection_falls_back_to_x86() {
    let registry = sample();
    let installer = &registry.get("arduino").unwrap().installer;
    assert_eq!(
        installer.url_for_arch(Architecture::X86_64).unwrap(),
        installer.x86.as_deref().unwrap()
    );
}

#[test]
fn url_selection_rejects_missing_x86() {
    let installer = Installer {
        kind: InstallerKind::Msi,
        interactive: false,
        x86: None,
        x86_64: Some("https://example.com/a.msi".to_string()),
        options: None,
    };
    assert!(installer.url_for_arch(Architecture::X86).is_err());
}

#[test]
fn url_selection_rejects_entries_without_urls() {
    let installer = Installer {
        kind: InstallerKind::Msi,
        interactive: false,
        x86: Some("  ".to_string()),
        x86_64: None,
        options: None,
    };
    let err = installer.url_for_arch(Architecture::X86_64).unwrap_err();
    assert!(err.to_string().contains("missing both"));
    assert!(installer.urls().is_empty());
}

#[test]
fn package_expansion_binds_version() {
    let registry = sample();
    let package = registry.get("7zip").unwrap();
    let url = package
        .expand(
            package.installer.url_for_arch(Architecture::X86_64).unwrap(),
            &Variables::default(),
        )
        .unwrap();
    assert_eq!(url, "https://www.7-zip.org/a/7z19.00-x64.msi");
}

#[test]
fn architecture_round_trips_through_strings() {
    for arch in Architecture::ALL {
        assert_eq!(arch.as_str().parse::<Architecture>().unwrap(), arch);
    }
    assert!("amd64".parse::<Architecture>().is_err());
}
