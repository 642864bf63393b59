//! The Aegis-X project proposal.
//!
//! All content is fixed; [`build`] appends it block by block in reading order.

use std::path::Path;

use docx_rs::{AlignmentType, BreakType, Docx, Paragraph, Run, Table, TableRow};

use crate::docx::{self, heading, paragraph, table_cell};
use crate::error::Error;

/// File name written to the current directory when no output path is given.
pub const OUTPUT_FILE: &str = "Aegis_X_Project_Proposal.docx";

pub const SUCCESS_MESSAGE: &str = "Document generated successfully!";

pub const TITLE: &str = "Aegis-X: Decentralized Threat Intelligence";

const SUBTITLE: &str = "via Federated Graph Learning & Blockchain Provenance";

const ABSTRACT: &str = "\
The primary failure mode in inter-agency counter-terrorism is data isolation; agencies possess \
complementary intelligence fragments but are operationally restricted from pooling sensitive raw data. \
Aegis-X solves this 'Privacy-Utility Paradox' by introducing a Federated Learning (FL) architecture \
that enables collaborative threat detection without ever moving raw data from an agency\u{2019}s local server.\n\n\
Our solution operates on a three-stage modular pipeline. First, a Polyglot Ingestion Engine \
(built on Python & Apache Kafka) normalizes heterogeneous data streams. Second, a distributed \
Knowledge Graph utilizes Graph Neural Networks (GNN) to autonomously identify high-dimensional \
relationships\u{2014}such as correlating a flagged financial transaction with a CCTV vehicle sighting\u{2014}that \
human analysts would miss. Finally, a Zero-Trust Security Layer backed by a Blockchain Ledger \
ensures an immutable audit trail for every data interaction.";

const PROBLEM: &str = "\
Current national security infrastructure suffers from the 'Blindness of Asymmetry'. \
The Police, Financial Intelligence Unit (FIU), and Border Control operate on disconnected databases. \
Manual data sharing requests take days to process, by which time critical threats may have escalated. \
Furthermore, agencies are hesitant to share full databases due to privacy laws and fear of leaks.";

const ARCHITECTURE: &str = "The Aegis-X architecture is composed of three distinct layers:\n\
1. Ingestion Layer: Connects to agency silos via read-only APIs.\n\
2. Intelligence Layer: The GNN Engine that connects entities (Person, Vehicle, Phone) across silos.\n\
3. Governance Layer: The Blockchain network that logs every 'Grant Access' request.";

const METHODOLOGY: &str = "\
To preserve privacy, we utilize a 'Compute-to-Data' approach. Instead of sending data to the cloud, \
we send the AI model to the data. Agency A and Agency B train the model locally on their private servers. \
Only the mathematical weight updates (gradients) are sent to the central server, ensuring raw records \
never leave the agency firewall.";

const FLOWCHART_PIPELINE: &str = "[INSERT FLOWCHART 1 HERE: High-Level Modular Pipeline]";
const FLOWCHART_TRAINING: &str = "[INSERT FLOWCHART 2 HERE: The Federated Training Loop]";

pub const STACK_HEADER: [&str; 2] = ["Component", "Technology Used"];

// Two equal columns across the 6.5in text width, in twips
const COLUMN_WIDTH: usize = 4680;

/// (component, technology) rows of the technology table, in presentation order.
pub const TECHNOLOGY_STACK: [(&str, &str); 8] = [
    ("Core AI Engine", "TensorFlow Federated (TFF), PyTorch Geometric (GNN)"),
    ("Natural Language Processing", "HuggingFace Transformers (BERT/RoBERTa)"),
    ("Knowledge Graph Database", "Neo4j Community Edition"),
    ("Search Engine", "Elasticsearch (Vector Search)"),
    ("Backend API", "Python FastAPI (Async), Node.js"),
    ("Data Stream", "Apache Kafka / RabbitMQ"),
    ("Frontend Dashboard", "React.js + WebGL (react-force-graph)"),
    ("Security Audit", "Hyperledger Fabric / Custom SHA-256 Blockchain"),
];

pub fn build() -> Docx {
    let doc = docx::with_styles(Docx::new(), "Calibri", 11.0);

    title_page(doc)
        .add_paragraph(Paragraph::new().add_run(Run::new().add_break(BreakType::Page)))
        .add_paragraph(heading("1. Executive Abstract", 1))
        .add_paragraph(paragraph(ABSTRACT).align(AlignmentType::Both))
        .add_paragraph(heading("2. Problem Statement: The Silo Effect", 1))
        .add_paragraph(paragraph(PROBLEM))
        .add_paragraph(heading("3. System Architecture", 1))
        .add_paragraph(placeholder(FLOWCHART_PIPELINE))
        .add_paragraph(paragraph(ARCHITECTURE))
        .add_paragraph(heading("4. AI Methodology: Federated Learning", 1))
        .add_paragraph(placeholder(FLOWCHART_TRAINING))
        .add_paragraph(paragraph(METHODOLOGY))
        .add_paragraph(heading("5. Technology Stack", 1))
        .add_table(technology_table())
}

fn title_page(doc: Docx) -> Docx {
    let info = Paragraph::new()
        .add_run(docx::text_run("Track 4: Inter-Agency Data Sharing\n").bold())
        .add_run(docx::text_run("Team Name: [INSERT TEAM NAME]\n"))
        .add_run(docx::text_run("Date: December 19, 2025"))
        .align(AlignmentType::Center);

    doc.add_paragraph(heading(TITLE, 0).align(AlignmentType::Center))
        .add_paragraph(
            paragraph(SUBTITLE)
                .align(AlignmentType::Center)
                .style("Subtitle"),
        )
        // spacer
        .add_paragraph(Paragraph::new())
        .add_paragraph(info)
}

/// Stand-in for a diagram that is pasted in by hand later.
fn placeholder(label: &str) -> Paragraph {
    Paragraph::new()
        .add_run(docx::text_run(label).bold().size(24))
        .align(AlignmentType::Center)
}

fn technology_table() -> Table {
    let header = TableRow::new(STACK_HEADER.into_iter().map(table_cell).collect());
    let rows = std::iter::once(header)
        .chain(TECHNOLOGY_STACK.iter().map(|(component, technology)| {
            TableRow::new(vec![table_cell(component), table_cell(technology)])
        }))
        .collect();

    Table::new(rows)
        .style("TableGrid")
        .set_grid(vec![COLUMN_WIDTH; 2])
}

/// Builds the proposal and writes it to `output`, replacing any existing file.
pub fn build_and_save(output: &Path) -> Result<(), Error> {
    docx::save(build(), output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::outline::{self, Alignment, Outline, OutlineBlock};

    fn built() -> Outline {
        outline::read_bytes(&docx::to_bytes(build()).unwrap()).unwrap()
    }

    #[test]
    fn sections_follow_title_page() {
        let outline = built();
        let headings: Vec<(u8, &str)> = outline.headings().collect();
        assert_eq!(
            headings,
            [
                (0, "Aegis-X: Decentralized Threat Intelligence"),
                (1, "1. Executive Abstract"),
                (1, "2. Problem Statement: The Silo Effect"),
                (1, "3. System Architecture"),
                (1, "4. AI Methodology: Federated Learning"),
                (1, "5. Technology Stack"),
            ]
        );
        let breaks = outline
            .blocks
            .iter()
            .filter(|b| **b == OutlineBlock::PageBreak)
            .count();
        assert_eq!(breaks, 1);
    }

    #[test]
    fn placeholders_are_bold_and_centered() {
        let outline = built();
        let placeholders: Vec<_> = outline
            .blocks
            .iter()
            .filter_map(|b| match b {
                OutlineBlock::Paragraph { alignment, runs, .. }
                    if b.text().starts_with("[INSERT FLOWCHART") =>
                {
                    Some((alignment, runs))
                }
                _ => None,
            })
            .collect();
        assert_eq!(placeholders.len(), 2);
        for (alignment, runs) in placeholders {
            assert_eq!(*alignment, Some(Alignment::Center));
            assert!(runs[0].bold);
            assert_eq!(runs[0].size, Some(12.0));
        }
    }

    #[test]
    fn only_the_metadata_lead_is_bold() {
        let outline = built();
        let Some(OutlineBlock::Paragraph { alignment, runs, .. }) = outline
            .blocks
            .iter()
            .find(|b| b.text().starts_with("Track 4"))
        else {
            panic!("expected the metadata paragraph");
        };
        let bold: Vec<bool> = runs.iter().map(|r| r.bold).collect();
        assert_eq!(bold, [true, false, false]);
        assert_eq!(*alignment, Some(Alignment::Center));
    }

    #[test]
    fn table_is_last_block() {
        let outline = built();
        let Some(OutlineBlock::Table { style, rows }) = outline.blocks.last() else {
            panic!("expected the technology table last");
        };
        assert_eq!(style.as_deref(), Some("TableGrid"));
        assert_eq!(rows.len(), 9);
        assert_eq!(rows[0], ["Component", "Technology Used"]);
        assert_eq!(rows[8], ["Security Audit", "Hyperledger Fabric / Custom SHA-256 Blockchain"]);
    }
}
