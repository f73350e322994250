use std::fmt::Display;
use std::fs;
use std::path::Path;

use ini_query::{FromIni, IniFile, IniReader, Settings};

const FILE1: &str = "\
[Section1]
; section comment
var1=5.0 ; a comment after a value
var2=some text

[Section2]
var1=1
var2=value_2

; Section3 has no keys
[Section3]
[Section4]
Mode=
Vid=

; sections may repeat
[Section1]
var3=value
var1=1.0 ; overrides the earlier var1
";

const FILE2: &str = "[Section1]\nvar1=5.0\n\n[Section2\nvar1=1\n";
const FILE3: &str = "[Section1]\nvar1=5.0\n\nSection2]\nvar1=1\n";
const FILE4: &str = "[Section1]\nvar1=5.0\n\n]Section2[\nvar1=1\n";
const FILE5: &str = "\
[Section1]
var1=5.0
var2=some text

[Section2]
var1=      2147483648
var2=3.4028235e+39

[Section4]
Mode=
Vid

[Section1]
var3=3,56
var1=1.0
";

fn lookup<T: FromIni>(dir: &Path, file: &str, query: &str) -> Result<T, ini_query::Error> {
    let reader = IniReader::builder()
        .with_source(IniFile::new(dir.join(file)))
        .with_settings(Settings::builder().with_env("INI", "__").build()?)
        .build()?;
    Ok(reader.get(query)?)
}

fn show<T: FromIni + Display>(dir: &Path, file: &str, query: &str) {
    match lookup::<T>(dir, file, query) {
        Ok(value) => println!("\x1B[32m{query} ({file}) = {value} as {}\x1B[0m\n", T::KIND),
        Err(e) => println!("\x1B[31m{e}\x1B[0m\n"),
    }
}

fn main() -> std::io::Result<()> {
    let tmp = tempfile::tempdir()?;
    for (name, contents) in [
        ("file1.ini", FILE1),
        ("file2.ini", FILE2),
        ("file3.ini", FILE3),
        ("file4.ini", FILE4),
        ("file5.ini", FILE5),
    ] {
        fs::write(tmp.path().join(name), contents)?;
    }
    let dir = tmp.path();

    println!("\x1B[36m----- file errors -----\x1B[0m");
    show::<i32>(dir, "file7.ini", "section1.var1");

    println!("\x1B[36m----- query errors -----\x1B[0m");
    show::<i32>(dir, "file1.ini", "section1var1");
    show::<i32>(dir, "file1.ini", "secti#on1.var1");
    show::<i32>(dir, "file1.ini", "section1.va r1");

    println!("\x1B[36m----- section header errors -----\x1B[0m");
    show::<f64>(dir, "file2.ini", "section1.var1");
    show::<f64>(dir, "file3.ini", "section1.var1");
    show::<f64>(dir, "file4.ini", "section1.var1");

    println!("\x1B[36m----- missing values -----\x1B[0m");
    show::<f64>(dir, "file5.ini", "section4.Mode");
    show::<f64>(dir, "file5.ini", "section4.Vid");

    println!("\x1B[36m----- integers -----\x1B[0m");
    show::<i32>(dir, "file1.ini", "section1.var1");
    show::<i32>(dir, "file1.ini", "section1.var2");
    show::<i32>(dir, "file1.ini", "section15.var2");
    show::<i32>(dir, "file1.ini", "section1.var25");
    show::<i32>(dir, "file5.ini", "section2.var1");
    show::<i64>(dir, "file5.ini", "section2.var1");
    show::<i32>(dir, "file1.ini", "section2.var1");

    println!("\x1B[36m----- floats -----\x1B[0m");
    show::<f64>(dir, "file1.ini", "section1.var2");
    show::<f32>(dir, "file5.ini", "section2.var2");
    show::<f64>(dir, "file5.ini", "section2.var2");
    show::<f64>(dir, "file5.ini", "section1.var3");
    show::<f64>(dir, "file1.ini", "section1.var1");

    println!("\x1B[36m----- text -----\x1B[0m");
    show::<String>(dir, "file1.ini", "section2.var2");
    show::<String>(dir, "file1.ini", "section1.var2");
    show::<String>(dir, "file1.ini", "section1.var3");

    Ok(())
}
