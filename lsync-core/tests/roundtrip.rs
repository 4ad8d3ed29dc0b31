use std::path::Path;

use fs_err as fs;
use lsync_core::config::{Config, Source, Target};
use lsync_core::init::init;
use lsync_core::remote::local::LocalRemote;
use lsync_core::{pull, push, Remote, RemoteLocale};

fn write(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

#[test]
fn push_then_pull_into_another_layout() {
    let tmp = tempfile::tempdir().unwrap();
    let root = tmp.path().join("project");
    fs::create_dir_all(root.join(".git")).unwrap();
    let remote_dir = tmp.path().join("remote");

    let mut config = Config::new_local(Some("app".to_string()), Some("yml".to_string()), &remote_dir);
    config.add_source(Source::new("./config/<locale_name>/<locale_code>.yml"));
    config.add_target(Target::new("./out/<locale_code>.yml"));
    init(&root, config).unwrap();

    let remote = LocalRemote::new(&remote_dir);
    remote
        .save_locales("app", &[RemoteLocale::new("en-locale-id", "en", "english")])
        .unwrap();

    write(&root, "config/english/en.yml", "en:\n  hello: Hello\n");
    write(&root, "config/german/de.yml", "de:\n  hello: Hallo\n");

    let config = Config::find(&root).unwrap().unwrap();
    let pushed = push(&root, &config).unwrap();
    assert_eq!(pushed.uploaded, 2);
    assert_eq!(pushed.created, 1);

    let locales = remote.locales("app").unwrap();
    assert_eq!(locales.len(), 2);
    assert_eq!(locales[1], RemoteLocale::new("de-locale-id", "de", "german"));

    let pulled = pull(&root, &config, false).unwrap();
    assert_eq!(pulled.downloaded, 2);
    assert_eq!(fs::read_to_string(root.join("out/en.yml")).unwrap(), "en:\n  hello: Hello\n");
    assert_eq!(fs::read_to_string(root.join("out/de.yml")).unwrap(), "de:\n  hello: Hallo\n");
}

#[test]
fn pull_of_unknown_locale_leaves_empty_file() {
    let tmp = tempfile::tempdir().unwrap();
    let root = tmp.path().to_path_buf();
    fs::create_dir_all(root.join(".git")).unwrap();

    let mut config = Config::new_local(Some("app".to_string()), None, root.join(".lsync-remote"));
    config.add_target(Target::new("./locales/<locale_code>.json"));
    init(&root, config).unwrap();
    LocalRemote::new(root.join(".lsync-remote"))
        .save_locales("app", &[RemoteLocale::new("fr-locale-id", "fr", "french")])
        .unwrap();

    let config = Config::find(&root).unwrap().unwrap();
    let pulled = pull(&root, &config, false).unwrap();
    assert_eq!(pulled.downloaded, 1);
    assert_eq!(pulled.results[0].bytes, Some(0));
    assert!(root.join("locales/fr.json").is_file());
}
