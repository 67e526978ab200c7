//! ROUGE Configuration Document
//!
//! Serializes evaluation tasks into the XML file ROUGE-1.5.5 reads with `-m`.
//! Tag and attribute names are fixed by ROUGE; whitespace is cosmetic.
//!
//! ```text
//! <ROUGE-EVAL version="1.55">
//!     <EVAL ID="1">
//!         <MODEL-ROOT>/models</MODEL-ROOT>
//!         <PEER-ROOT>/systems</PEER-ROOT>
//!         <INPUT-FORMAT TYPE="SEE">
//!         </INPUT-FORMAT>
//!         <PEERS>
//!             <P ID="1">sys-001.html</P>
//!         </PEERS>
//!         <MODELS>
//!             <M ID="A">ref-001-A.html</M>
//!         </MODELS>
//!     </EVAL>
//! </ROUGE-EVAL>
//! ```

use std::path::Path;

use quick_xml::escape::partial_escape;
use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use rouge_harness_core::{CoreError, CoreResult, EvalTask};

/// Version attribute of the document root
pub const ROUGE_EVAL_VERSION: &str = "1.55";

/// Peer ID used when no variant labels are in play
pub const DEFAULT_PEER_ID: &str = "1";

/// Input format marker; summaries are in SEE (HTML) format
pub const INPUT_FORMAT: &str = "SEE";

/// Letter code for the reference at `index` (`0 -> 'A'`).
pub fn reference_letter(index: usize) -> Option<char> {
    if index < 26 {
        Some((b'A' + index as u8) as char)
    } else {
        None
    }
}

/// Render the configuration document for `tasks`.
///
/// Tasks are numbered from 1 in input order. Fails when there are no tasks,
/// when a task has no references, or when a task has more references than
/// there are letters.
pub fn generate(tasks: &[EvalTask], system_root: &Path, model_root: &Path) -> CoreResult<String> {
    if tasks.is_empty() {
        return Err(CoreError::validation("Cannot write a ROUGE configuration without tasks"));
    }

    let model_root = model_root.to_string_lossy();
    let system_root = system_root.to_string_lossy();

    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 4);
    emit(
        &mut writer,
        Event::Start(BytesStart::new("ROUGE-EVAL").with_attributes([("version", ROUGE_EVAL_VERSION)])),
    )?;

    for (index, task) in tasks.iter().enumerate() {
        write_task(&mut writer, index + 1, task, &system_root, &model_root)?;
    }

    emit(&mut writer, Event::End(BytesEnd::new("ROUGE-EVAL")))?;

    let mut document = String::from_utf8(writer.into_inner())
        .map_err(|e| CoreError::internal(format!("Generated document is not UTF-8: {}", e)))?;
    document.push('\n');
    Ok(document)
}

/// Render the document and write it to `path`.
pub fn write_document(
    tasks: &[EvalTask],
    system_root: &Path,
    model_root: &Path,
    path: &Path,
) -> CoreResult<()> {
    let document = generate(tasks, system_root, model_root)?;
    std::fs::write(path, document)?;
    tracing::info!("[Document] Written ROUGE configuration to {}", path.display());
    Ok(())
}

fn write_task(
    writer: &mut Writer<Vec<u8>>,
    task_id: usize,
    task: &EvalTask,
    system_root: &str,
    model_root: &str,
) -> CoreResult<()> {
    if task.references.is_empty() {
        return Err(CoreError::missing_references(&task.identifier, ""));
    }
    if task.references.len() > 26 {
        return Err(CoreError::TooManyReferences {
            task_id,
            count: task.references.len(),
        });
    }

    let id = task_id.to_string();
    emit(writer, Event::Start(BytesStart::new("EVAL").with_attributes([("ID", id.as_str())])))?;
    text_element(writer, BytesStart::new("MODEL-ROOT"), model_root)?;
    text_element(writer, BytesStart::new("PEER-ROOT"), system_root)?;
    emit(
        writer,
        Event::Start(BytesStart::new("INPUT-FORMAT").with_attributes([("TYPE", INPUT_FORMAT)])),
    )?;
    emit(writer, Event::End(BytesEnd::new("INPUT-FORMAT")))?;

    emit(writer, Event::Start(BytesStart::new("PEERS")))?;
    for peer in &task.peers {
        let peer_id = peer.variant.as_deref().unwrap_or(DEFAULT_PEER_ID);
        text_element(writer, BytesStart::new("P").with_attributes([("ID", peer_id)]), &peer.filename)?;
    }
    emit(writer, Event::End(BytesEnd::new("PEERS")))?;

    emit(writer, Event::Start(BytesStart::new("MODELS")))?;
    for (index, reference) in task.references.iter().enumerate() {
        let letter = reference_letter(index)
            .ok_or_else(|| CoreError::internal("reference letter out of range"))?
            .to_string();
        text_element(
            writer,
            BytesStart::new("M").with_attributes([("ID", letter.as_str())]),
            reference,
        )?;
    }
    emit(writer, Event::End(BytesEnd::new("MODELS")))?;

    emit(writer, Event::End(BytesEnd::new("EVAL")))
}

/// Write `<tag attrs>text</tag>`. Only `<`, `>` and `&` are escaped so that
/// file names reach ROUGE as written.
fn text_element(writer: &mut Writer<Vec<u8>>, start: BytesStart<'_>, text: &str) -> CoreResult<()> {
    let end = BytesEnd::new(String::from_utf8_lossy(start.name().as_ref()).into_owned());
    emit(writer, Event::Start(start))?;
    emit(writer, Event::Text(BytesText::from_escaped(partial_escape(text))))?;
    emit(writer, Event::End(end))
}

fn emit(writer: &mut Writer<Vec<u8>>, event: Event<'_>) -> CoreResult<()> {
    writer
        .write_event(event)
        .map_err(|e| CoreError::internal(format!("Failed to write configuration XML: {}", e)))
}
