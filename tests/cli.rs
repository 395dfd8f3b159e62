use flate2::write::GzEncoder;
use flate2::Compression;
use std::fs;
use std::io::Write;
use std::process::{Command, Output, Stdio};
use tempfile::tempdir;

fn run(args: &[&str], input: &str) -> Output {
    let mut child = Command::new(env!("CARGO_BIN_EXE_urlsort"))
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("failed to start urlsort");
    {
        let mut stdin = child.stdin.take().unwrap();
        stdin.write_all(input.as_bytes()).unwrap();
    }
    child.wait_with_output().unwrap()
}

fn sort_ok(args: &[&str], input: &str) -> String {
    let out = run(args, input);
    assert!(out.status.success(), "stderr : {}", String::from_utf8_lossy(&out.stderr));
    String::from_utf8(out.stdout).unwrap()
}

fn check_cases(cases: &[(&str, &str, &str)]) {
    for (name, input, expected) in cases {
        assert_eq!(sort_ok(&[], input), *expected, "case : {}", name);
    }
}

#[test]
fn domains() {
    check_cases(&[
        (
            "reverse domain components",
            "https://www.yahoo.com\nhttps://www.example.com\nhttp://test.com",
            "https://www.example.com\nhttp://test.com\nhttps://www.yahoo.com\n",
        ),
        (
            "case insensitive domain",
            "https://EXAMPLE.COM\nhttps://example.com\nhttps://Example.Com",
            "https://EXAMPLE.COM\nhttps://example.com\nhttps://Example.Com\n",
        ),
        (
            "subdomain ordering",
            "https://a.example.com\nhttps://z.example.com\nhttps://example.com",
            "https://example.com\nhttps://a.example.com\nhttps://z.example.com\n",
        ),
    ]);
}

#[test]
fn ip_addresses() {
    check_cases(&[
        (
            "ipv4 kept as is",
            "http://192.168.1.1\nhttp://10.0.0.1\nhttp://172.16.0.1",
            "http://10.0.0.1\nhttp://172.16.0.1\nhttp://192.168.1.1\n",
        ),
        (
            "ipv6 kept as is",
            "http://[2001:db8::2]\nhttp://[2001:db8::1]\nhttp://[::1]",
            "http://[2001:db8::1]\nhttp://[2001:db8::2]\nhttp://[::1]\n",
        ),
        (
            "mixed ips and domains",
            "http://example.com\nhttp://192.168.1.1\nhttp://test.com",
            "http://192.168.1.1\nhttp://example.com\nhttp://test.com\n",
        ),
    ]);
}

#[test]
fn ports() {
    check_cases(&[
        (
            "numeric ports",
            "https://example.com:8080\nhttps://example.com:443\nhttp://example.com:80",
            "http://example.com:80\nhttps://example.com:443\nhttps://example.com:8080\n",
        ),
        (
            "default ports",
            "https://example.com\nhttp://example.com\nftp://example.com",
            "ftp://example.com\nhttp://example.com\nhttps://example.com\n",
        ),
        (
            "explicit vs default ports",
            "http://example.com:80\nhttp://example.com\nhttps://example.com:443",
            "http://example.com:80\nhttp://example.com\nhttps://example.com:443\n",
        ),
        (
            "file scheme has no port",
            "file:///path/to/file\nhttp://example.com:80\nhttps://example.com",
            "file:///path/to/file\nhttp://example.com:80\nhttps://example.com\n",
        ),
    ]);
}

#[test]
fn schemes() {
    check_cases(&[
        (
            "case insensitive scheme",
            "HTTPS://example.com\nhttp://example.com\nHttp://example.com",
            "http://example.com\nHttp://example.com\nHTTPS://example.com\n",
        ),
        (
            "different schemes",
            "https://example.com\nftp://example.com\nhttp://example.com",
            "ftp://example.com\nhttp://example.com\nhttps://example.com\n",
        ),
        (
            "no scheme",
            "http://example.com/path\nexample.com/path",
            "example.com/path\nhttp://example.com/path\n",
        ),
    ]);
}

#[test]
fn paths_queries_fragments() {
    check_cases(&[
        (
            "case sensitive paths",
            "http://example.com/Path\nhttp://example.com/path\nhttp://example.com/PATH",
            "http://example.com/PATH\nhttp://example.com/Path\nhttp://example.com/path\n",
        ),
        (
            "no path before empty path",
            "http://example.com/\nhttp://example.com",
            "http://example.com\nhttp://example.com/\n",
        ),
        (
            "whole query string",
            "http://example.com?b=2&a=1\nhttp://example.com?a=1&b=2",
            "http://example.com?a=1&b=2\nhttp://example.com?b=2&a=1\n",
        ),
        (
            "case sensitive query",
            "http://example.com?a=1\nhttp://example.com?A=1",
            "http://example.com?A=1\nhttp://example.com?a=1\n",
        ),
        (
            "fragments",
            "http://example.com#b\nhttp://example.com#a\nhttp://example.com#A",
            "http://example.com#A\nhttp://example.com#a\nhttp://example.com#b\n",
        ),
    ]);
}

#[test]
fn invalid_lines() {
    let out = sort_ok(&[], "not a url\nhttp://valid.com\nalso invalid");
    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(lines.len(), 3);
    assert_eq!(lines[2], "http://valid.com");
    check_cases(&[
        (
            "empty lines",
            "http://example.com\n\nhttp://test.com",
            "\nhttp://example.com\nhttp://test.com\n",
        ),
        (
            "malformed",
            "http://valid.com\n://invalid\nhttp://",
            "://invalid\nhttp://\nhttp://valid.com\n",
        ),
    ]);
}

#[test]
fn verbatim_output() {
    let input = "HTTP://B.example.com/%7e/x  \r\nhttp://a.example.com/ \n";
    let out = sort_ok(&[], input);
    assert_eq!(out, "http://a.example.com/ \nHTTP://B.example.com/%7e/x  \r\n");
}

#[test]
fn empty_and_single() {
    assert_eq!(sort_ok(&[], ""), "");
    assert_eq!(sort_ok(&[], "https://example.com\n"), "https://example.com\n");
    assert_eq!(sort_ok(&[], "https://example.com"), "https://example.com\n");
}

#[test]
fn idempotent() {
    let input = "https://www.yahoo.com\nmailto:x@y.com\nhttp://yahoo.com:8080/a\n\
                 ws://yahoo.com/s\nhttp://10.1.1.1/\nrelative/path\nhttp://yahoo.com/?q";
    let once = sort_ok(&[], input);
    let twice = sort_ok(&[], &once);
    assert_eq!(once, twice);
}

#[test]
fn files() {
    let dir = tempdir().unwrap();
    let file1 = dir.path().join("file1.txt");
    let file2 = dir.path().join("file2.txt");
    fs::write(&file1, "https://z.com\nhttp://a.com").unwrap();
    fs::write(&file2, "https://m.com\nhttp://b.com").unwrap();
    let f1 = file1.to_str().unwrap();
    let f2 = file2.to_str().unwrap();

    assert_eq!(sort_ok(&[f1], ""), "http://a.com\nhttps://z.com\n");
    assert_eq!(
        sort_ok(&[f1, f2], ""),
        "http://a.com\nhttp://b.com\nhttps://m.com\nhttps://z.com\n"
    );
    assert_eq!(
        sort_ok(&[f1, "-", f1], "http://c.com\n"),
        "http://a.com\nhttp://a.com\nhttp://c.com\nhttps://z.com\nhttps://z.com\n"
    );
}

#[test]
fn gzip_input() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("urls.gz");
    let mut enc = GzEncoder::new(Vec::new(), Compression::default());
    enc.write_all(b"https://z.com\nhttp://a.com\n").unwrap();
    fs::write(&path, enc.finish().unwrap()).unwrap();
    assert_eq!(sort_ok(&[path.to_str().unwrap()], ""), "http://a.com\nhttps://z.com\n");
}

#[test]
fn missing_file() {
    let dir = tempdir().unwrap();
    let good = dir.path().join("good.txt");
    fs::write(&good, "http://a.com\n").unwrap();
    let missing = dir.path().join("missing.txt");
    let out = run(&[good.to_str().unwrap(), missing.to_str().unwrap()], "");
    assert!(!out.status.success());
    assert!(out.stdout.is_empty());
    let err = String::from_utf8_lossy(&out.stderr);
    assert!(err.contains("missing.txt"), "stderr : {}", err);
}

#[test]
fn output_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("output.txt");
    let name = path.to_str().unwrap();
    for flag in ["-o", "--output-file"] {
        fs::write(&path, "left over text that is longer than the output\n").unwrap();
        let out = sort_ok(&[flag, name], "https://z.com\nhttp://a.com");
        assert_eq!(out, "");
        assert_eq!(fs::read_to_string(&path).unwrap(), "http://a.com\nhttps://z.com\n");
    }
}

#[test]
fn unwritable_output() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("no/such/dir/out.txt");
    let out = run(&["-o", path.to_str().unwrap()], "http://a.com\n");
    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("out.txt"));
}

#[test]
fn unique_reverse() {
    assert_eq!(
        sort_ok(&["-u"], "http://example.com\nhttp://b.com\nhttp://example.com:80\n"),
        "http://b.com\nhttp://example.com\n"
    );
    assert_eq!(
        sort_ok(&["--reverse"], "http://a.com\nhttp://c.com\nhttp://b.com\n"),
        "http://c.com\nhttp://b.com\nhttp://a.com\n"
    );
}

#[test]
fn check() {
    let out = run(&["-c"], "http://a.com\nhttp://b.com\n");
    assert!(out.status.success());
    assert!(out.stdout.is_empty());
    let out = run(&["--check"], "http://a.com\nhttp://c.com\nhttp://b.com\n");
    assert_eq!(out.status.code(), Some(1));
    assert!(out.stdout.is_empty());
    let err = String::from_utf8_lossy(&out.stderr);
    assert!(err.starts_with("urlsort: disorder at line 3: http://b.com\n"), "stderr : {}", err);
    let out = run(&["-c", "-u"], "http://a.com\nhttp://a.com:80\n");
    assert_eq!(out.status.code(), Some(1));
}

#[test]
fn help() {
    let out = run(&["--help"], "");
    assert!(out.status.success());
    let text = String::from_utf8_lossy(&out.stdout);
    assert!(text.contains("--output-file"));
    let out = run(&["-h"], "");
    assert!(out.status.success());
}
