// pdf-converter/src/utils/file_name.rs

//! アップロードファイル名と変換後ファイル名のヘルパー

const PDF_EXTENSION: &str = ".pdf";
const CONVERTED_SUFFIX: &str = "_converted.docx";
const FALLBACK_STEM: &str = "document";

/// 拡張子が `.pdf`（大文字小文字を区別しない）かを判定
pub fn is_pdf_file_name(file_name: &str) -> bool {
    file_name.to_lowercase().ends_with(PDF_EXTENSION)
}

/// パス区切りを除いたファイル名から最後の拡張子を取り除く
///
/// `../reports/Q1.final.pdf` → `Q1.final`
pub fn file_stem(file_name: &str) -> &str {
    let base = file_name
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(file_name);

    match base.rfind('.') {
        Some(0) | None => base,
        Some(idx) => &base[..idx],
    }
}

/// 変換後のファイル名 `<stem>_converted.docx`
pub fn converted_file_name(original: &str) -> String {
    let stem = file_stem(original);
    let stem = if stem.trim().is_empty() {
        FALLBACK_STEM
    } else {
        stem
    };
    format!("{}{}", stem, CONVERTED_SUFFIX)
}

/// `Content-Disposition: attachment` ヘッダー値を生成
///
/// 非ASCIIのファイル名は `filename*` (RFC 6266) で渡し、`filename` にはASCIIの代替名を入れる。
pub fn content_disposition(file_name: &str) -> String {
    let fallback: String = file_name
        .chars()
        .map(|c| {
            if c.is_ascii() && !c.is_ascii_control() && c != '"' && c != '\\' {
                c
            } else {
                '_'
            }
        })
        .collect();

    if fallback == file_name {
        format!("attachment; filename=\"{}\"", file_name)
    } else {
        format!(
            "attachment; filename=\"{}\"; filename*=UTF-8''{}",
            fallback,
            urlencoding::encode(file_name)
        )
    }
}
