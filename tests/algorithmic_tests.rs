//! Algorithmic backend tests

use algoline::{Target, compile};
use pretty_assertions::assert_eq;

fn algo(source: &str) -> String {
    compile(source, Target::Algorithmic).expect("compilation failed")
}

#[test]
fn test_loop_and_print() {
    let output = algo("int a\nfor i 1 10\nprint a & i\nend\n");
    assert_eq!(
        output,
        "Algorithme principal\n\
         Début\n\
         \x20   a : entier\n\
         \x20   Pour i allant de 1 à 10 (exclu) faire\n\
         \x20       Afficher a, i\n\
         \x20   Fin Pour\n\
         Fin\n"
    );
}

#[test]
fn test_function() {
    let output = algo("fx int add int a int b\nreturn a + b\nend\n");
    assert_eq!(
        output,
        "Fonction add(a : entier, b : entier) : entier\n\
         \x20   Retourner a + b\n\
         Fin Fonction\n\
         \n\
         Algorithme principal\n\
         Début\n\
         Fin\n"
    );
}

#[test]
fn test_procedure_with_documentation() {
    let output = algo("fx void show string &msg\ndata msg le message\nprint msg\nend\n");
    assert!(output.starts_with(
        "Procédure show(msg : chaîne de caractères en donnée/résultat)\n\
         \x20   Données : msg le message\n\
         \x20   Afficher msg\n\
         Fin Procédure\n"
    ));
}

#[test]
fn test_conditions_keep_connectives() {
    let output = algo("while a ET NON b\nif a OU b\nprint 1\nelse\nprint 2\nend\nend\n");
    assert!(output.contains(
        "    Tant que a ET NON b faire\n\
         \x20       Si a OU b alors\n\
         \x20           Afficher 1\n\
         \x20       Sinon\n\
         \x20           Afficher 2\n\
         \x20       Fin Si\n\
         \x20   Fin Tant que\n"
    ));
}

#[test]
fn test_switch() {
    let output = algo("switch x\ncase 1\nprint 1\nend\ndefault\nprint 0\nend\nend\n");
    assert!(output.contains(
        "    Selon x :\n\
         \x20       Cas 1 :\n\
         \x20           Afficher 1\n\
         \x20       Fin Cas\n\
         \x20       Autre cas :\n\
         \x20           Afficher 0\n\
         \x20       Fin Cas\n\
         \x20   Fin Selon\n"
    ));
}

#[test]
fn test_declarations_and_arrays() {
    let output = algo("float x y\nstring s = \"abc\"\narr bool cases 8 8\ninput x\n");
    assert!(output.contains("    x, y : réel\n"));
    assert!(output.contains("    s : chaîne de caractères ← \"abc\"\n"));
    assert!(output.contains("    cases : Tableau[8][8] de booléens initialisé à 0\n"));
    assert!(output.contains("    Saisir x\n"));
}

#[test]
fn test_print_newline() {
    let output = algo("print \"total(ENDL)\" & (ENDL)\n");
    assert!(output.contains("    Afficher \"total\\n\", retour à la ligne\n"));
}

#[test]
fn test_structure_foreach_and_init() {
    let output = algo(
        "struct Fleur string nom int petales\ninit Fleur rose nom \"Rose\" petales 5\nforeach struct_Fleur f bouquet\nend\nCODE_RETOUR 0\n",
    );
    assert!(output.starts_with(
        "Structure Fleur : nom : chaîne de caractères, petales : entier\n\n"
    ));
    assert!(output.contains(
        "    Initialisation de rose (Structure Fleur) avec nom = \"Rose\", petales = 5\n"
    ));
    assert!(output.contains(
        "    Pour chaque élément de bouquet stockés dans f (type Structure Fleur)\n    Fin Pour\n"
    ));
    assert!(output.contains("    Code de retour : 0\n"));
}

#[test]
fn test_graphics_descriptions() {
    let output = algo(
        "winit \"Jeu\" 800 600\ncolor 255 0 0\ncircle 10 20 5\nppixel 1 2 255 255 255\ndelay 100\npspace\nx = wdisplay()\nwquit\n",
    );
    assert!(output.contains(
        "    Initialisation de la fenêtre avec pour nom \"Jeu\", largeur 800, et hauteur 600\n\
         \x20   Changement de la couleur vers (255, 0, 0)\n\
         \x20   Trace un cercle de centre (10, 20) et de rayon 5\n\
         \x20   Pose un pixel sur la fenêtre aux coordonnées (1, 2) avec une couleur (255, 255, 255)\n\
         \x20   Attendre 100 ms\n\
         \x20   Attente d'un appui sur Espace de l'utilisateur\n\
         \x20   x = AfficherFenêtre()\n\
         \x20   Fermeture de la fenêtre\n"
    ));
}

#[test]
fn test_image_into_variable() {
    let output = algo("winit \"Jeu\" 800 600\nimg \"fond.png\" <- fond\n");
    assert!(output.contains(
        "    Charge l'image au chemin \"fond.png\" dans la variable fond\n"
    ));
}

#[test]
fn test_image_type_is_declared() {
    let output = algo("image fond\n");
    assert!(output.contains("    fond : Image\n"));
}
