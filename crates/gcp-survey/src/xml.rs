//! `surveydata` XML serialization.
//!
//! The schema is fixed by the downstream reconstruction service. The writer
//! applies no XML escaping to image names; scan capture controls the file
//! names, so `<` and `&` never occur in them.

use std::io::Write;
use std::path::Path;

use gcp_survey_core::CorrelationDocument;

use crate::SurveyError;

/// Serialize the document to a writer.
pub fn write_survey_xml<W: Write>(document: &CorrelationDocument, out: &mut W) -> std::io::Result<()> {
    writeln!(out, r#"<?xml version="1.0" encoding="UTF-8"?>"#)?;
    writeln!(
        out,
        r#"<surveydata coordinatesystem="XYZ" description="Local coordinatesystem; millimeters" epsgcode="0">"#
    )?;
    writeln!(out, " <markers>")?;
    for entry in &document.entries {
        let def = &entry.definition;
        writeln!(
            out,
            r#"   <marker id="{}" name="{}">"#,
            def.marker_id, def.label
        )?;
        writeln!(out, "     <images>")?;
        for obs in &entry.observations {
            writeln!(
                out,
                r#"       <image name="{}" xpixel="{}" ypixel="{}"/>"#,
                obs.image_name, obs.xpixel, obs.ypixel
            )?;
        }
        writeln!(out, "     </images>")?;
        writeln!(
            out,
            r#"     <gcp x="{:.3}" y="{:.3}" z="{:.3}"/>"#,
            def.x_mm, def.y_mm, def.z_mm
        )?;
        writeln!(out, "   </marker>")?;
    }
    writeln!(out, " </markers>")?;
    writeln!(out, "</surveydata>")?;
    Ok(())
}

/// Serialize the document to a string. Infallible by construction.
pub fn survey_xml_string(document: &CorrelationDocument) -> String {
    let mut buf = Vec::new();
    write_survey_xml(document, &mut buf).expect("writing to a Vec cannot fail");
    String::from_utf8(buf).expect("survey xml is valid UTF-8")
}

/// Write the document to a file.
///
/// On failure the caller still owns the document; a write error is a
/// reporting problem, not a pipeline abort.
pub fn write_survey_file(document: &CorrelationDocument, path: &Path) -> Result<(), SurveyError> {
    let mut file = std::fs::File::create(path).map_err(|source| SurveyError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    write_survey_xml(document, &mut file).map_err(|source| SurveyError::Write {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use gcp_survey_core::{marker_positions, MarkerEntry, MarkerLayout, Observation};

    fn sample_document() -> CorrelationDocument {
        let definitions = marker_positions(&MarkerLayout::default());
        CorrelationDocument {
            entries: vec![
                MarkerEntry {
                    definition: definitions[&12], // marker_id 0
                    observations: vec![Observation {
                        marker_id: 0,
                        image_name: "IMG_0153.JPG".into(),
                        xpixel: 2659,
                        ypixel: 57,
                    }],
                },
                MarkerEntry {
                    definition: definitions[&3],
                    observations: vec![
                        Observation {
                            marker_id: 3,
                            image_name: "IMG_0138.JPG".into(),
                            xpixel: 2051,
                            ypixel: 946,
                        },
                        Observation {
                            marker_id: 3,
                            image_name: "IMG_0139.JPG".into(),
                            xpixel: 2030,
                            ypixel: 1366,
                        },
                    ],
                },
            ],
        }
    }

    #[test]
    fn serializes_the_fixed_schema() {
        let xml = survey_xml_string(&sample_document());
        let expected = concat!(
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n",
            "<surveydata coordinatesystem=\"XYZ\" description=\"Local coordinatesystem; millimeters\" epsgcode=\"0\">\n",
            " <markers>\n",
            "   <marker id=\"0\" name=\"12\">\n",
            "     <images>\n",
            "       <image name=\"IMG_0153.JPG\" xpixel=\"2659\" ypixel=\"57\"/>\n",
            "     </images>\n",
            "     <gcp x=\"35.000\" y=\"-0.000\" z=\"-15.000\"/>\n",
            "   </marker>\n",
            "   <marker id=\"3\" name=\"3\">\n",
            "     <images>\n",
            "       <image name=\"IMG_0138.JPG\" xpixel=\"2051\" ypixel=\"946\"/>\n",
            "       <image name=\"IMG_0139.JPG\" xpixel=\"2030\" ypixel=\"1366\"/>\n",
            "     </images>\n",
            "     <gcp x=\"0.000\" y=\"35.000\" z=\"-15.000\"/>\n",
            "   </marker>\n",
            " </markers>\n",
            "</surveydata>\n",
        );
        assert_eq!(xml, expected);
    }

    #[test]
    fn empty_document_serializes_to_an_empty_marker_list() {
        let xml = survey_xml_string(&CorrelationDocument::default());
        assert!(xml.contains(" <markers>\n </markers>\n"));
    }

    #[test]
    fn write_failure_reports_the_path() {
        let doc = CorrelationDocument::default();
        let err = write_survey_file(&doc, Path::new("/nonexistent/dir/gcp.xml")).unwrap_err();
        assert!(matches!(err, SurveyError::Write { .. }));
    }
}
